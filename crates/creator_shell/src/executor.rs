//! Runs shell commands against a session

use creator_engine::Engine;
use creator_scene::{ShadingAffordance, SubstanceAffordance};
use creator_session::{SessionController, SessionError};
use creator_store::SceneStore;

use crate::command::{Command, HELP};

/// Execute `command` and return the lines to print.
///
/// `Quit` is handled by the caller and prints nothing here.
pub async fn execute<E: Engine, S: SceneStore>(
    session: &SessionController<E, S>,
    command: &Command,
) -> Vec<String> {
    let result = match command {
        Command::Save => session
            .save_current()
            .await
            .map(|()| vec![format!("saved {:?}", session.current_name())]),
        Command::Delete => {
            let name = session.current_name();
            session
                .delete_current()
                .await
                .map(|()| vec![format!("deleted {:?}", name)])
        }
        Command::Load(name) => session
            .load(name)
            .await
            .map(|()| vec![format!("loaded {:?}", name)]),
        Command::Rename(name) => session
            .rename(name)
            .await
            .map(|()| vec![format!("renamed to {:?}", name)]),
        Command::Shape => session
            .toggle_shape()
            .await
            .map(|shape| vec![format!("shape: {}", shape)]),
        Command::Material(axis) => session
            .toggle_material_mode(*axis)
            .await
            .map(|mode| vec![format!("material: {:?} / {:?}", mode.substance, mode.shading)]),
        Command::Grid => session.toggle_grid().await.map(|visible| {
            vec![format!("grid: {}", if visible { "visible" } else { "hidden" })]
        }),
        Command::Color { hex, alpha } => session
            .set_color(hex, alpha.as_deref())
            .await
            .map(|c| vec![format!("color: {} alpha {}", c.rgb().to_hex(), c.a)]),
        Command::List => Ok(list(session)),
        Command::Status => Ok(status(session)),
        Command::Diagnostics => Ok(diagnostics(session)),
        Command::Help => Ok(HELP.lines().map(str::to_string).collect()),
        Command::Quit => Ok(Vec::new()),
    };

    result.unwrap_or_else(|err| vec![describe(command, &err)])
}

fn describe(command: &Command, err: &SessionError) -> String {
    match err {
        SessionError::Busy => format!("{}: busy, dropped", command),
        SessionError::Parse(e) => format!("{}: {}", command, e),
        other => format!("{}: failed ({})", command, other),
    }
}

fn list<E: Engine, S: SceneStore>(session: &SessionController<E, S>) -> Vec<String> {
    let current = session.current_name();
    session
        .selector_options()
        .iter()
        .map(|option| {
            let marker = if option.scene_name() == Some(current.as_str()) { "*" } else { " " };
            format!("{} {}", marker, option.label())
        })
        .collect()
}

fn status<E: Engine, S: SceneStore>(session: &SessionController<E, S>) -> Vec<String> {
    let toggles = session.toggles();
    let material = toggles.material();
    let color = session.color();

    let substance = match material.substance_affordance() {
        SubstanceAffordance::Solid => "fluid (offers solid)",
        SubstanceAffordance::Fluid => "solid (offers fluid)",
    };
    let shading = match material.shading_affordance() {
        ShadingAffordance::Noise => "smooth (offers noise)",
        ShadingAffordance::Smooth => "noise (offers smooth)",
    };

    vec![
        format!("scene:    {}", session.current_name()),
        format!("startup:  {:?}", session.startup_phase()),
        format!("shape:    {}", toggles.shape()),
        format!("material: {}, {}", substance, shading),
        format!(
            "grid:     {} (offers {:?})",
            if toggles.grid_visible() { "visible" } else { "hidden" },
            session.grid_affordance()
        ),
        format!("color:    {} alpha {}", color.rgb().to_hex(), color.a),
        format!("busy:     {}", session.is_busy()),
    ]
}

fn diagnostics<E: Engine, S: SceneStore>(session: &SessionController<E, S>) -> Vec<String> {
    let entries = session.diagnostics();
    if entries.is_empty() {
        return vec!["no diagnostics".to_string()];
    }
    entries.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use creator_engine::HeadlessEngine;
    use creator_session::SessionConfig;
    use creator_store::MemoryStore;

    async fn started() -> SessionController<HeadlessEngine, MemoryStore> {
        let session = SessionController::new(
            HeadlessEngine::new(["scene"]),
            MemoryStore::new(),
            SessionConfig::default(),
        );
        session.start().await.unwrap();
        session
    }

    async fn run(
        session: &SessionController<HeadlessEngine, MemoryStore>,
        line: &str,
    ) -> Vec<String> {
        let command = Command::parse(line).unwrap().unwrap();
        execute(session, &command).await
    }

    #[tokio::test]
    async fn test_save_then_list() {
        let session = started().await;

        assert_eq!(run(&session, "rename Blue").await, vec!["renamed to \"Blue\""]);
        assert_eq!(run(&session, "save").await, vec!["saved \"Blue\""]);
        assert_eq!(run(&session, "list").await, vec!["  none", "* Blue"]);
    }

    #[tokio::test]
    async fn test_toggles() {
        let session = started().await;

        assert_eq!(run(&session, "shape").await, vec!["shape: Cube"]);
        assert_eq!(run(&session, "grid").await, vec!["grid: hidden"]);
        assert_eq!(run(&session, "fluid").await, vec!["material: Fluid / Smooth"]);
        assert_eq!(run(&session, "color #ff0000 64").await, vec!["color: #ff0000 alpha 64"]);
    }

    #[tokio::test]
    async fn test_invalid_color_reported() {
        let session = started().await;

        let output = run(&session, "color zzzzzz").await;

        assert_eq!(output.len(), 1);
        assert!(output[0].starts_with("color zzzzzz: "));
        assert_eq!(run(&session, "diagnostics").await, vec!["no diagnostics"]);
    }

    #[tokio::test]
    async fn test_failed_load_shows_in_diagnostics() {
        let session = started().await;

        let output = run(&session, "load Missing").await;
        assert!(output[0].starts_with("load Missing: failed"));

        let diagnostics = run(&session, "diagnostics").await;
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].contains("load"));
    }

    #[tokio::test]
    async fn test_status() {
        let session = started().await;

        let output = run(&session, "status").await;

        assert_eq!(output[0], "scene:    Default");
        assert_eq!(output[1], "startup:  Ready");
        assert!(output.iter().any(|line| line == "busy:     false"));
    }
}
