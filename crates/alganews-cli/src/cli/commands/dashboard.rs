use alganews_admin::Route;
use alganews_admin::events::UiEvent;
use alganews_core::config::Config;
use alganews_core::sdk::metric::ChartSeries;
use anyhow::Result;

use super::session::{self, money, print_notifications};

pub async fn show(config: &Config) -> Result<()> {
    let mut runtime = session::signed_in(config).await?;
    session::run(&mut runtime, UiEvent::Navigate(Route::Home)).await;
    print_notifications(&mut runtime);

    let home = &runtime.state().home;

    let mut posts = session::table(["ID", "Title", "Published"]);
    for post in &home.posts.list {
        posts.add_row([
            post.id.to_string(),
            post.title.clone(),
            if post.published { "yes" } else { "no" }.to_string(),
        ]);
    }
    println!("Latest posts\n{posts}\n");

    let mut chart = session::table(["Month", "Series", "Amount"]);
    for point in &home.metrics.list {
        chart.add_row([
            point.year_month.clone(),
            ChartSeries::label(point.category).to_string(),
            money(point.value),
        ]);
    }
    println!("Revenues and expenses\n{chart}");
    Ok(())
}
