// src/lib.rs

pub mod cli;
pub mod engine;
pub mod errors;
pub mod export;
pub mod logging;
pub mod model;
pub mod store;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::{CliArgs, Command, DepCommand};
use crate::model::{Task, TaskId};
use crate::store::{GraphStore, InMemoryStore};

/// High-level entry point used by `main.rs`.
///
/// Loads (and validates) the graph file, dispatches the subcommand to the
/// engine, and saves the file back after a mutating command. Each
/// invocation is one logical operation against the store: validation and
/// commit see the same snapshot, and a rejected operation never writes.
pub fn run(args: CliArgs) -> Result<()> {
    let path = PathBuf::from(&args.file);
    let mut store = store::load_or_default(&path)?;

    match args.command {
        Command::Add { title, description } => {
            let id = engine::create_task(&mut store, &title, description)?;
            save(&store, &path)?;
            println!("created task {id}: {title}");
        }

        Command::List => {
            for task in store.tasks() {
                print_task_line(task);
            }
        }

        Command::Show { id } => {
            let task = store.task(id)?.clone();
            print_task_line(&task);
            if let Some(desc) = &task.description {
                println!("  description: {desc}");
            }
            println!("  created: {}", task.created_at);
            println!("  updated: {}", task.updated_at);
            print_related(&store, "depends on", &store.dependencies_of(id))?;
            print_related(&store, "needed by", &store.dependents_of(id))?;
        }

        Command::Edit { id, title, description } => {
            engine::update_task(&mut store, id, title.as_deref(), description)?;
            save(&store, &path)?;
            println!("updated task {id}");
        }

        Command::Status { id, status } => {
            let updated = engine::set_status(&mut store, id, status)?;
            save(&store, &path)?;
            report_updates(&store, &updated)?;
        }

        Command::Rm { id } => {
            let task = engine::remove_task(&mut store, id)?;
            save(&store, &path)?;
            println!("removed task {id}: {}", task.title);
        }

        Command::Dep(DepCommand::Add { task, depends_on }) => {
            let edge = engine::check_and_insert_edge(&mut store, task, depends_on)?;
            save(&store, &path)?;
            println!("task {} now depends on {}", edge.task, edge.depends_on);
            let t = store.task(task)?;
            println!("task {} is {}", t.id, t.status);
        }

        Command::Dep(DepCommand::Rm { task, depends_on }) => {
            let removed = engine::remove_edge(&mut store, task, depends_on)?;
            if removed {
                save(&store, &path)?;
                println!("removed dependency {task} -> {depends_on}");
            } else {
                println!("no dependency {task} -> {depends_on}");
            }
        }

        Command::Graph => {
            let export = export::export_graph(&store);
            let json =
                serde_json::to_string_pretty(&export).context("serializing graph export")?;
            println!("{json}");
        }
    }

    Ok(())
}

fn save(store: &InMemoryStore, path: &Path) -> Result<()> {
    store::save_to_path(store, path)?;
    info!(?path, "graph saved");
    Ok(())
}

fn print_task_line(task: &Task) {
    println!("{:>4}  {:<12} {}", task.id, task.status.to_string(), task.title);
}

fn print_related(store: &InMemoryStore, label: &str, ids: &[TaskId]) -> Result<()> {
    for &id in ids {
        let task = store.task(id)?;
        println!("  {label}: {} ({})", task.title, task.status);
    }
    Ok(())
}

fn report_updates(store: &InMemoryStore, updated: &[TaskId]) -> Result<()> {
    if updated.is_empty() {
        println!("no status changes");
        return Ok(());
    }
    for &id in updated {
        let task = store.task(id)?;
        println!("task {} is now {}", task.id, task.status);
    }
    Ok(())
}
