use crate::Route;
use crate::hooks::use_push_route;
use yew::prelude::*;

/// A navigation item in the sidebar.
#[derive(Clone, PartialEq)]
pub struct NavItem {
    pub title: &'static str,
    pub route: Route,
}

/// Sidebar navigation items. Add new sections here.
pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        title: "Dashboard",
        route: Route::Home,
    },
    NavItem {
        title: "Exam Types",
        route: Route::ExamTypes,
    },
    NavItem {
        title: "Subjects",
        route: Route::Subjects,
    },
    NavItem {
        title: "Test Series",
        route: Route::TestSeries,
    },
    NavItem {
        title: "Free Tests",
        route: Route::FreeTests,
    },
    NavItem {
        title: "Previous Year Papers",
        route: Route::Pyqs,
    },
    NavItem {
        title: "Questions",
        route: Route::Questions,
    },
    NavItem {
        title: "Students",
        route: Route::Students,
    },
    NavItem {
        title: "PDFs",
        route: Route::Pdfs,
    },
    NavItem {
        title: "Subscriptions",
        route: Route::Subscriptions,
    },
];

/// The nav item a route belongs to. Detail pages highlight their section.
pub fn section_of(route: &Route) -> Route {
    match route {
        Route::Hierarchy { .. } => Route::Subjects,
        Route::NodeQuestions { .. } => Route::Questions,
        other => other.clone(),
    }
}

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    /// Current active route for highlighting.
    pub active_route: Route,
    /// Callback when a nav item is clicked (for closing mobile drawer).
    #[prop_or_default]
    pub on_navigate: Option<Callback<()>>,
}

const LINK_BASE_CLASSES: &str =
    "block px-4 py-2 text-sm transition-colors cursor-pointer";
const LINK_INACTIVE_CLASSES: &str = "text-neutral-600 dark:text-neutral-400 \
    hover:text-neutral-900 dark:hover:text-white \
    hover:bg-neutral-100 dark:hover:bg-neutral-800";
const LINK_ACTIVE_CLASSES: &str = "text-neutral-900 dark:text-white \
    bg-neutral-100 dark:bg-neutral-800 font-medium";

#[function_component]
pub fn Sidebar(props: &SidebarProps) -> Html {
    let push_route = use_push_route();
    let section = section_of(&props.active_route);

    html! {
        <nav class="py-4">
            <div class="px-4 pb-2 text-xs font-semibold uppercase tracking-wider \
                        text-neutral-500 dark:text-neutral-400">
                {"Manage"}
            </div>
            <ul>
                { for NAV_ITEMS.iter().map(|item| {
                    let is_active = section == item.route;

                    let link_classes = format!(
                        "{} {}",
                        LINK_BASE_CLASSES,
                        if is_active { LINK_ACTIVE_CLASSES } else { LINK_INACTIVE_CLASSES }
                    );

                    let on_click = {
                        let push_route = push_route.clone();
                        let route = item.route.clone();
                        let on_navigate = props.on_navigate.clone();
                        Callback::from(move |_: MouseEvent| {
                            push_route.emit(route.clone());
                            if let Some(ref cb) = on_navigate {
                                cb.emit(());
                            }
                        })
                    };

                    html! {
                        <li key={item.title}>
                            <div
                                class={link_classes}
                                onclick={on_click}
                            >
                                {item.title}
                            </div>
                        </li>
                    }
                })}
            </ul>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_pages_highlight_their_section() {
        assert_eq!(
            section_of(&Route::Hierarchy {
                subject_id: "s1".into()
            }),
            Route::Subjects
        );
        assert_eq!(
            section_of(&Route::NodeQuestions {
                node_id: "n1".into()
            }),
            Route::Questions
        );
        assert_eq!(section_of(&Route::Pdfs), Route::Pdfs);
    }

    #[test]
    fn every_section_is_listed_once() {
        let mut titles: Vec<_> = NAV_ITEMS.iter().map(|i| i.title).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), NAV_ITEMS.len());
    }
}
