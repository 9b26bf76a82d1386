use solimo_core::{ActivityScheduler, Config, SystemClock};

use super::open_app;

pub async fn run_today(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let app = open_app(config)?;
    let today = app.today().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&today)?);
        return Ok(());
    }

    println!("{} ({})", today.date.format("%A %Y-%m-%d"), today.age_band);
    println!("Today's activity: {} [level {}]", today.activity_name, today.level);
    if today.completed {
        println!("Status: done for today. See you tomorrow!");
    } else {
        println!("Status: ready to play");
    }
    Ok(())
}

pub fn run_week(days: u64, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let plan = ActivityScheduler::new(SystemClock).week_ahead(days);

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    for day in plan {
        println!(
            "{}  {:<9}  {}",
            day.date,
            day.day_name,
            day.activity.display_name()
        );
    }
    Ok(())
}
