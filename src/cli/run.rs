use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{error, scheduler, spotify::gateway::ApiGateway, success, tasks, warning};

pub async fn run(gateway: Arc<ApiGateway>, task_name: Option<String>) {
    let all = tasks::default_tasks();

    match task_name {
        Some(name) => {
            let task = match all
                .iter()
                .find(|t| t.name == name || t.kind.to_string() == name)
            {
                Some(task) => task,
                None => error!("Couldn't find task {}", name),
            };

            let pb = ProgressBar::new_spinner();
            pb.set_message(format!("Running {}...", task.name));
            pb.enable_steady_tick(Duration::from_millis(100));
            pb.set_style(
                ProgressStyle::with_template("{spinner:.blue} {msg}")
                    .unwrap()
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
            );

            let result = task.run(&gateway).await;
            pb.finish_and_clear();
            match result {
                Ok(()) => success!("[{}] Run successfully", task.name),
                Err(e) => warning!("[{}] Failed to run, {}", task.name, e),
            }
        }
        None => scheduler::run_all(gateway, all).await,
    }
}
