//! Dashboard: latest posts and company revenue/expense metrics.

use alganews_core::sdk::metric::{ChartPoint, to_chart_points};
use alganews_core::sdk::post::{PostQuery, PostSummary};

use crate::common::TaskSeq;
use crate::effects::{ApiCall, UiEffect};
use crate::events::HomeEvent;
use crate::features::slice::ListSlice;

#[derive(Debug, Clone)]
pub struct HomeState {
    pub posts: ListSlice<PostSummary, PostQuery>,
    /// Chart points, two per month.
    pub metrics: ListSlice<ChartPoint, ()>,
}

impl Default for HomeState {
    fn default() -> Self {
        Self {
            posts: ListSlice::new(PostQuery::latest()),
            metrics: ListSlice::new(()),
        }
    }
}

pub fn handle_home_event(home: &mut HomeState, tasks: &mut TaskSeq, event: HomeEvent) -> Vec<UiEffect> {
    match event {
        HomeEvent::Fetch => {
            let (posts_task, query) = home.posts.begin_fetch(tasks);
            let (metrics_task, ()) = home.metrics.begin_fetch(tasks);
            vec![
                UiEffect::api(ApiCall::FetchLatestPosts {
                    task: posts_task,
                    query,
                }),
                UiEffect::api(ApiCall::FetchMetrics { task: metrics_task }),
            ]
        }
        HomeEvent::PostsLoaded { task, result } => {
            home.posts.finish_fetch(task, result.map(|page| page.content));
            vec![]
        }
        HomeEvent::MetricsLoaded { task, result } => {
            home.metrics
                .finish_fetch(task, result.map(|metrics| to_chart_points(&metrics)));
            vec![]
        }
    }
}
