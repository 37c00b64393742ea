//! Creator shell
//!
//! Drives a scene editing session from line commands on stdin. The
//! session, the render loop and each mutating command run as tasks on one
//! thread, so a command issued while another is still waiting on the
//! store is dropped exactly as a racing click would be.
//!
//! Run with: cargo run -p creator_shell -- [config.toml]

mod command;
mod config;
mod executor;

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use creator_engine::{HeadlessEngine, RenderLoop};
use creator_session::SessionController;
use creator_store::FileStore;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::LocalSet;

use crate::command::Command;
use crate::config::ShellConfig;

fn main() {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match ShellConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            log::error!("Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    let local = LocalSet::new();
    if let Err(e) = local.block_on(&runtime, run(config)) {
        log::error!("Shell stopped: {}", e);
        std::process::exit(1);
    }
}

type Session = SessionController<Rc<HeadlessEngine>, FileStore>;

async fn run(config: ShellConfig) -> std::io::Result<()> {
    log::info!("Scene store: {:?}", config.store_dir);

    let engine = Rc::new(HeadlessEngine::new([config.session.surface_id.clone()]));
    let store = FileStore::new(&config.store_dir);
    let session: Rc<Session> = Rc::new(SessionController::new(
        Rc::clone(&engine),
        store,
        config.session.clone(),
    ));

    // Startup failures leave a partial session; keep taking commands
    if let Err(e) = session.start().await {
        log::warn!("Startup incomplete ({:?}): {}", session.startup_phase(), e);
    }

    let render_loop = RenderLoop::new(config.session.surface_id.clone(), config.frame_interval());
    let render_engine = Rc::clone(&engine);
    let render =
        tokio::task::spawn_local(async move { render_loop.run(&*render_engine, None).await });
    println!("Type 'help' for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }

        if command.is_mutating() {
            let session = Rc::clone(&session);
            tokio::task::spawn_local(async move {
                print_lines(executor::execute(&session, &command).await);
            });
        } else {
            print_lines(executor::execute(&session, &command).await);
        }
    }

    // Let an in-flight save or delete finish before exiting
    tokio::task::yield_now().await;
    while session.is_busy() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    render.abort();
    log::info!("Drew {} frames", engine.frames());
    Ok(())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}
