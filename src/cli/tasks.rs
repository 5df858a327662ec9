use tabled::Table;

use crate::{tasks, types::TaskTableRow};

pub fn list_tasks() {
    let rows: Vec<TaskTableRow> = tasks::default_tasks()
        .iter()
        .map(|task| TaskTableRow {
            name: task.name.clone(),
            kind: task.kind.to_string(),
            schedule: task.schedule_description(),
            on_start: if task.run_on_start { "yes" } else { "no" }.to_string(),
        })
        .collect();

    let table = Table::new(rows);
    println!("{}", table);
}
