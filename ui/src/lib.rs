use payloads::responses::{
    ExamType, FreeTest, Pdf, Pyq, Question, Student, Subject, Subscription,
    TestSeries,
};
use payloads::{APIClient, NodeId, SubjectId};
use yew::prelude::*;
use yew_router::prelude::*;

pub mod components;
pub mod contexts;
pub mod crud;
pub mod forms;
pub mod hooks;
mod logs;
pub mod pages;
pub mod resources;
pub mod session;
pub mod state;
pub mod tree;
pub mod utils;

pub use state::{AuthState, State};

use components::{MainLayout, RequireAuth, ResourcePage, ToastContainer};
use contexts::ToastProvider;
use hooks::use_session_restore;
use pages::{
    DashboardPage, HierarchyPage, LoginPage, NodeQuestionsPage, NotFoundPage,
};

/// Used when the page has no usable origin, e.g. under a test runner.
const FALLBACK_BACKEND_URL: &str = "http://localhost:5000";

/// API client for the configured backend, carrying `token` if given.
///
/// The backend address is taken from `BACKEND_URL` at build time, falling
/// back to the page's own origin.
pub fn get_api_client(token: Option<&str>) -> APIClient {
    let address = option_env!("BACKEND_URL")
        .map(|url| url.trim_end_matches('/').to_string())
        .or_else(|| {
            web_sys::window().and_then(|window| window.location().origin().ok())
        })
        .unwrap_or_else(|| FALLBACK_BACKEND_URL.to_string());

    APIClient {
        address,
        inner_client: reqwest::Client::new(),
        token: token.map(str::to_string),
    }
}

#[function_component]
pub fn App() -> Html {
    logs::init_logging();
    use_session_restore();

    html! {
        <ToastProvider>
            <BrowserRouter>
                <ToastContainer />
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ToastProvider>
    }
}

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/exam-types")]
    ExamTypes,
    #[at("/subjects")]
    Subjects,
    #[at("/subjects/:subject_id/hierarchy")]
    Hierarchy { subject_id: String },
    #[at("/test-series")]
    TestSeries,
    #[at("/free-tests")]
    FreeTests,
    #[at("/pyqs")]
    Pyqs,
    #[at("/questions")]
    Questions,
    #[at("/hierarchy/:node_id/questions")]
    NodeQuestions { node_id: String },
    #[at("/students")]
    Students,
    #[at("/pdfs")]
    Pdfs,
    #[at("/subscriptions")]
    Subscriptions,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    let page = match route {
        Route::Login => return html! { <LoginPage /> },
        Route::Home => html! { <DashboardPage /> },
        Route::ExamTypes => html! { <ResourcePage<ExamType> /> },
        Route::Subjects => html! { <ResourcePage<Subject> /> },
        Route::Hierarchy { subject_id } => html! {
            <HierarchyPage subject_id={SubjectId(subject_id)} />
        },
        Route::TestSeries => html! { <ResourcePage<TestSeries> /> },
        Route::FreeTests => html! { <ResourcePage<FreeTest> /> },
        Route::Pyqs => html! { <ResourcePage<Pyq> /> },
        Route::Questions => html! { <ResourcePage<Question> /> },
        // Keyed so that moving between nodes starts a fresh list
        Route::NodeQuestions { node_id } => {
            let key = node_id.clone();
            html! { <NodeQuestionsPage key={key} node_id={NodeId(node_id)} /> }
        }
        Route::Students => html! { <ResourcePage<Student> /> },
        Route::Pdfs => html! { <ResourcePage<Pdf> /> },
        Route::Subscriptions => html! { <ResourcePage<Subscription> /> },
        Route::NotFound => html! { <NotFoundPage /> },
    };

    html! {
        <RequireAuth>
            <MainLayout>
                {page}
            </MainLayout>
        </RequireAuth>
    }
}
