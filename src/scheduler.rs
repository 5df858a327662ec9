//! Interval-driven task execution.
//!
//! One loop per task. A task's next tick is scheduled only after its current
//! run completes, so a task never overlaps itself; distinct tasks interleave
//! freely. A failed run is logged and never stops the schedule.

use std::sync::Arc;

use chrono::Local;

use crate::{info, spotify::gateway::ApiGateway, success, tasks::TaskConfig, utils, warning};

pub async fn run_all(gateway: Arc<ApiGateway>, tasks: Vec<TaskConfig>) {
    let mut handles = Vec::new();
    for task in tasks {
        let gateway = Arc::clone(&gateway);
        handles.push(tokio::spawn(run_task_loop(gateway, task)));
    }
    for handle in handles {
        if let Err(e) = handle.await {
            warning!("Task join error: {}", e);
        }
    }
}

async fn run_task_loop(gateway: Arc<ApiGateway>, task: TaskConfig) {
    info!("Setting up {}", task.name);

    if task.run_on_setup {
        run_once(&gateway, &task).await;
    }

    let Some(interval) = task.interval else {
        return;
    };
    let interval_std = match interval.to_std() {
        Ok(duration) => duration,
        Err(_) => {
            warning!("[{}] Ignoring non-positive interval", task.name);
            return;
        }
    };

    if let Some(anchor) = task.anchor {
        let start =
            utils::next_weekly_occurrence(Local::now(), anchor.weekday, anchor.hour, anchor.minute);
        info!(
            "[{}] Interval will not be started until {}",
            task.name,
            start.format("%Y-%m-%d %H:%M:%S")
        );
        let wait = (start - Local::now()).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;
    }

    if task.run_on_start {
        run_once(&gateway, &task).await;
    }

    loop {
        let next = Local::now() + interval;
        info!(
            "[{}] Next run is at {}",
            task.name,
            next.format("%Y-%m-%d %H:%M:%S")
        );
        tokio::time::sleep(interval_std).await;
        run_once(&gateway, &task).await;
    }
}

async fn run_once(gateway: &ApiGateway, task: &TaskConfig) {
    match task.run(gateway).await {
        Ok(()) => success!("[{}] Run successfully", task.name),
        Err(e) => warning!("[{}] Failed to run, {}", task.name, e),
    }
}
