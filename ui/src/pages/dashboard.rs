use futures::future::join3;
use payloads::ClientError;
use payloads::requests::ListQuery;
use payloads::responses::{DashboardStats, ExamType, Student};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::hooks::{FetchOptions, use_api_client, use_fetch, use_title};
use crate::resources::status_badge;
use crate::utils::time::created_cell;

const RECENT_COUNT: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub stats: DashboardStats,
    pub recent_students: Vec<Student>,
    pub recent_exam_types: Vec<ExamType>,
}

fn recent() -> ListQuery {
    ListQuery {
        limit: RECENT_COUNT,
        sort_by: Some("createdAt".to_string()),
        ..ListQuery::default()
    }
}

#[function_component]
pub fn DashboardPage() -> Html {
    use_title("Dashboard");
    let client = use_api_client();

    let dashboard = use_fetch((), FetchOptions::default(), move || {
        let client = client.clone();
        async move {
            let query = recent();
            let (stats, students, exam_types) = join3(
                client.dashboard_stats(),
                client.list::<Student>(&query),
                client.list::<ExamType>(&query),
            )
            .await;

            // The counters are the point of the page; the recent lists are
            // a nicety and may come back empty.
            let recent_students = students
                .map(|page| page.items)
                .unwrap_or_else(|e| {
                    tracing::warn!("Recent students unavailable: {e}");
                    Vec::new()
                });
            let recent_exam_types = exam_types
                .map(|page| page.items)
                .unwrap_or_else(|e| {
                    tracing::warn!("Recent exam types unavailable: {e}");
                    Vec::new()
                });

            Ok::<_, ClientError>(DashboardData {
                stats: stats?,
                recent_students,
                recent_exam_types,
            })
        }
    });

    html! {
        <div class="space-y-8">
            <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100">
                {"Dashboard"}
            </h1>
            {dashboard.render("dashboard", |data, _, _| html! {
                <>
                    <StatCards stats={data.stats.clone()} />
                    <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                        <RecentPanel title="Recent students" route={Route::Students}>
                            {for data.recent_students.iter().map(|student| html! {
                                <li key={student.id.to_string()} class="flex justify-between py-2">
                                    <div>
                                        <p class="text-sm font-medium text-neutral-900 dark:text-neutral-100">
                                            {&student.name}
                                        </p>
                                        <p class="text-xs text-neutral-500 dark:text-neutral-400">
                                            {&student.email}
                                        </p>
                                    </div>
                                    <span class="text-xs text-neutral-500 dark:text-neutral-400">
                                        {created_cell(student.created_at)}
                                    </span>
                                </li>
                            })}
                        </RecentPanel>
                        <RecentPanel title="Recent exam types" route={Route::ExamTypes}>
                            {for data.recent_exam_types.iter().map(|exam_type| html! {
                                <li key={exam_type.id.to_string()} class="flex justify-between items-center py-2">
                                    <p class="text-sm font-medium text-neutral-900 dark:text-neutral-100">
                                        {format!("{} ({})", exam_type.name, exam_type.code)}
                                    </p>
                                    {status_badge(exam_type.is_active)}
                                </li>
                            })}
                        </RecentPanel>
                    </div>
                </>
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct StatCardsProps {
    stats: DashboardStats,
}

#[function_component]
fn StatCards(props: &StatCardsProps) -> Html {
    let stats = &props.stats;
    let cards = [
        ("Students", stats.total_students),
        ("Exam Types", stats.total_exam_types),
        ("Test Series", stats.total_test_series),
        ("Questions", stats.total_questions),
        ("Active Subscriptions", stats.active_subscriptions),
    ];

    html! {
        <div class="grid grid-cols-2 md:grid-cols-3 xl:grid-cols-5 gap-4">
            {for cards.into_iter().map(|(label, value)| html! {
                <div key={label} class="bg-white dark:bg-neutral-800 p-5 rounded-lg \
                                        shadow-sm border border-neutral-200 \
                                        dark:border-neutral-700">
                    <p class="text-sm text-neutral-600 dark:text-neutral-400">{label}</p>
                    <p class="mt-1 text-2xl font-semibold text-neutral-900 \
                              dark:text-neutral-100">
                        {value}
                    </p>
                </div>
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct RecentPanelProps {
    title: AttrValue,
    route: Route,
    children: Html,
}

#[function_component]
fn RecentPanel(props: &RecentPanelProps) -> Html {
    html! {
        <div class="bg-white dark:bg-neutral-800 p-6 rounded-lg shadow-sm \
                    border border-neutral-200 dark:border-neutral-700">
            <div class="flex justify-between items-center mb-2">
                <h2 class="text-lg font-semibold text-neutral-900 dark:text-neutral-100">
                    {&props.title}
                </h2>
                <Link<Route>
                    to={props.route.clone()}
                    classes="text-sm text-neutral-600 dark:text-neutral-400 underline"
                >
                    {"View all"}
                </Link<Route>>
            </div>
            <ul class="divide-y divide-neutral-100 dark:divide-neutral-700">
                {props.children.clone()}
            </ul>
        </div>
    }
}
