pub mod confirmation_modal;
pub mod entity_form_modal;
pub mod form_field;
pub mod hierarchy_node_modal;
pub mod hierarchy_tree;
pub mod layout;
pub mod login_form;
pub mod modal;
pub mod pagination_controls;
pub mod require_auth;
pub mod resource_page;
pub mod search_input;
pub mod status_toggle;
pub mod toast;

pub use confirmation_modal::ConfirmationModal;
pub use entity_form_modal::EntityFormModal;
pub use form_field::{FormField, LABEL_CLASSES, LookupSelect, Select};
pub use hierarchy_node_modal::{HierarchyNodeModal, NodeTarget};
pub use hierarchy_tree::HierarchyTree;
pub use layout::MainLayout;
pub use login_form::LoginForm;
pub use modal::Modal;
pub use pagination_controls::PaginationControls;
pub use require_auth::RequireAuth;
pub use resource_page::ResourcePage;
pub use search_input::SearchInput;
pub use status_toggle::StatusToggle;
pub use toast::ToastContainer;
