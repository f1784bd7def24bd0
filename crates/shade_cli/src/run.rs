//! Build passes and watch mode

use anyhow::{Context, Result};
use clap::Args;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use shade_scan::{Emission, ScanSession, SourceWalker};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::config::ShadeConfig;

/// Flags shared by `build` and `watch`
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Project root to scan (overrides [scan].root)
    #[arg(long)]
    pub root: Option<PathBuf>,
    /// Stylesheet to prepend the theme block to
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// Where to write the result (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Write dependency records as JSON to this file
    #[arg(long)]
    pub deps: Option<PathBuf>,
}

/// Fully resolved build settings
#[derive(Debug)]
pub struct Target {
    pub root: PathBuf,
    pub walker: SourceWalker,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub deps: Option<PathBuf>,
}

impl Target {
    /// Merge CLI flags over config values
    pub fn resolve(config: &ShadeConfig, args: BuildArgs) -> Self {
        Self {
            root: args.root.unwrap_or_else(|| config.scan.root.clone()),
            walker: SourceWalker::with_extensions(config.scan.extensions.iter().cloned()),
            input: args.input.or_else(|| config.output.input.clone()),
            output: args.output.or_else(|| config.output.output.clone()),
            deps: args.deps.or_else(|| config.output.deps.clone()),
        }
    }

    /// Path reported as the parent of every dependency record
    pub fn origin(&self) -> PathBuf {
        self.input
            .clone()
            .or_else(|| self.output.clone())
            .unwrap_or_else(|| PathBuf::from("-"))
    }
}

/// Run one pass and write its results
pub async fn build_once(session: &mut ScanSession, target: &Target) -> Result<Emission> {
    let emission = session
        .run(&target.walker, &target.root, &target.origin())
        .await
        .with_context(|| format!("Failed to scan {}", target.root.display()))?;

    let document = match &target.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => String::new(),
    };
    let css = emission.apply(&document);

    match &target.output {
        Some(path) => write_file(path, &css)?,
        None => print!("{}", css),
    }

    if let Some(path) = &target.deps {
        let json = emission
            .dependencies_json()
            .context("Failed to serialize dependency records")?;
        write_file(path, &json)?;
    }

    Ok(emission)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// Build, then rebuild whenever a tracked file changes.
///
/// One session lives for the whole watch, so unchanged files are served from
/// its cache. A failed pass is logged and the next change retries.
pub async fn watch(mut session: ScanSession, target: Target, debounce: Duration) -> Result<()> {
    report(build_once(&mut session, &target).await);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        // receiver only goes away on shutdown
        let _ = tx.send(res);
    })
    .context("Failed to start file watcher")?;

    // event paths are reported relative to what was watched
    let root = target
        .root
        .canonicalize()
        .with_context(|| format!("Failed to resolve {}", target.root.display()))?;
    watcher
        .watch(&root, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {}", root.display()))?;
    let input = match &target.input {
        Some(path) => {
            let path = path
                .canonicalize()
                .with_context(|| format!("Failed to resolve {}", path.display()))?;
            watcher
                .watch(&path, RecursiveMode::NonRecursive)
                .with_context(|| format!("Failed to watch {}", path.display()))?;
            Some(path)
        }
        None => None,
    };

    info!(
        root = %root.display(),
        "Watching for changes (press Ctrl+C to stop)"
    );

    while let Some(res) = rx.recv().await {
        let event = match res {
            Ok(event) => event,
            Err(err) => {
                warn!(error = %err, "Watch error");
                continue;
            }
        };
        if !is_relevant(&event, &target.walker, input.as_deref()) {
            continue;
        }

        // wait for a quiet period so a burst of saves triggers one pass
        loop {
            match tokio::time::timeout(debounce, rx.recv()).await {
                Ok(Some(_)) => continue,
                Ok(None) => return Ok(()),
                Err(_) => break,
            }
        }

        info!(paths = ?event.paths, "Change detected, rebuilding");
        report(build_once(&mut session, &target).await);
    }

    Ok(())
}

fn report(result: Result<Emission>) {
    match result {
        Ok(emission) => {
            let variables = emission
                .block
                .as_ref()
                .map_or(0, |block| block.declarations().len());
            info!(
                variables,
                dependencies = emission.dependencies.len(),
                "Theme written"
            );
        }
        Err(err) => error!("{:#}", err),
    }
}

/// Whether a file-system event should trigger a pass
fn is_relevant(event: &Event, walker: &SourceWalker, input: Option<&Path>) -> bool {
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }
    event
        .paths
        .iter()
        .any(|path| walker.is_tracked(path) || input.is_some_and(|input| path == input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};
    use pretty_assertions::assert_eq;

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn flags_override_config() {
        let config: ShadeConfig = toml::from_str(
            r#"
[scan]
root = "web"
extensions = ["html"]

[output]
input = "web/app.css"
output = "dist/app.css"
"#,
        )
        .unwrap();
        let target = Target::resolve(
            &config,
            BuildArgs {
                output: Some(PathBuf::from("out.css")),
                ..BuildArgs::default()
            },
        );
        assert_eq!(target.root, PathBuf::from("web"));
        assert_eq!(target.walker.extensions(), ["html".to_string()]);
        assert_eq!(target.input, Some(PathBuf::from("web/app.css")));
        assert_eq!(target.output, Some(PathBuf::from("out.css")));
        assert_eq!(target.origin(), PathBuf::from("web/app.css"));
    }

    #[test]
    fn origin_falls_back_to_output_then_stdout() {
        let config = ShadeConfig::default();
        let target = Target::resolve(
            &config,
            BuildArgs {
                output: Some(PathBuf::from("out.css")),
                ..BuildArgs::default()
            },
        );
        assert_eq!(target.origin(), PathBuf::from("out.css"));

        let target = Target::resolve(&config, BuildArgs::default());
        assert_eq!(target.origin(), PathBuf::from("-"));
    }

    #[test]
    fn only_tracked_files_and_input_trigger_passes() {
        let walker = SourceWalker::new();
        let input = Path::new("/project/app.css");
        let modify = || EventKind::Modify(ModifyKind::Any);

        assert!(is_relevant(&event(modify(), "/project/src/a.tsx"), &walker, Some(input)));
        assert!(is_relevant(&event(modify(), "/project/app.css"), &walker, Some(input)));
        assert!(!is_relevant(&event(modify(), "/project/dist/app.css"), &walker, Some(input)));
        assert!(is_relevant(
            &event(EventKind::Create(CreateKind::File), "/project/new.html"),
            &walker,
            None
        ));
        assert!(!is_relevant(
            &event(EventKind::Access(AccessKind::Any), "/project/src/a.tsx"),
            &walker,
            None
        ));
    }

    #[tokio::test]
    async fn build_once_writes_output_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("index.html"), r#"<p class="text-lime-130">"#).unwrap();
        fs::write(root.join("app.css"), "body {}\n").unwrap();

        let target = Target {
            root: root.to_path_buf(),
            walker: SourceWalker::new(),
            input: Some(root.join("app.css")),
            output: Some(root.join("dist/app.css")),
            deps: Some(root.join("dist/deps.json")),
        };
        let mut session = ScanSession::default();
        build_once(&mut session, &target).await.unwrap();

        assert_eq!(
            fs::read_to_string(root.join("dist/app.css")).unwrap(),
            "@theme inline {\n  \
             --color-lime-130: color-mix(in oklab, var(--color-lime-100) 30%, var(--color-lime-200));\n\
             }\n\
             body {}\n"
        );
        let deps = fs::read_to_string(root.join("dist/deps.json")).unwrap();
        assert!(deps.contains("\"type\": \"dependency\""));
        assert!(deps.contains("index.html"));
    }
}
