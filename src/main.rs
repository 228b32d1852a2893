/// Session replay entry point for native builds
///
/// Usage: `polyedit-replay <script.json> [--image <path>] [--config <path>] [--pretty]`
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(e) = native::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use polyedit::export;
    use polyedit::handlers::update;
    use polyedit::session::{SessionError, SessionScript};
    use polyedit::{EditorConfig, ImageRef, Message, PolygonEditor};

    const USAGE: &str =
        "Usage: polyedit-replay <script.json> [--image <path>] [--config <path>] [--pretty]";

    #[derive(Debug, Default)]
    struct Args {
        script: PathBuf,
        image: Option<PathBuf>,
        config: Option<PathBuf>,
        pretty: bool,
    }

    fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
        let mut script = None;
        let mut parsed = Args::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--image" => {
                    parsed.image = Some(args.next().ok_or("--image needs a path")?.into());
                }
                "--config" => {
                    parsed.config = Some(args.next().ok_or("--config needs a path")?.into());
                }
                "--pretty" => parsed.pretty = true,
                "-h" | "--help" => return Err(USAGE.to_string()),
                other if other.starts_with("--") => {
                    return Err(format!("Unknown option '{}'\n{}", other, USAGE));
                }
                other if script.is_none() => script = Some(PathBuf::from(other)),
                other => return Err(format!("Unexpected argument '{}'\n{}", other, USAGE)),
            }
        }

        parsed.script = script.ok_or_else(|| USAGE.to_string())?;
        Ok(parsed)
    }

    #[derive(Debug, thiserror::Error)]
    pub enum CliError {
        #[error("{0}")]
        Usage(String),
        #[error(transparent)]
        Session(#[from] SessionError),
    }

    fn load_config(path: Option<&PathBuf>) -> Result<EditorConfig, SessionError> {
        match path {
            Some(path) => Ok(EditorConfig::load_from_path(path)?),
            None => Ok(EditorConfig::load_from_default_path().unwrap_or_default()),
        }
    }

    pub fn run() -> Result<(), CliError> {
        let args = parse_args(std::env::args().skip(1)).map_err(CliError::Usage)?;
        let config = load_config(args.config.as_ref())?;

        env_logger::Builder::new()
            .filter_level(config.preferences.log_level.to_level_filter())
            .parse_default_env()
            .init();

        let script = SessionScript::load(&args.script)?;
        let mut editor = PolygonEditor::with_preferences(&config.preferences);

        if let Some(path) = &args.image {
            let image = ImageRef::from_path(path).map_err(SessionError::from)?;
            update(&mut editor, &config.keybindings, Message::ImageLoaded { image });
        }

        let report = script.replay(&mut editor, &config.keybindings);
        log::info!(
            "Replayed {} messages ({} applied, {} ignored), {} vertices, mode {}",
            script.messages.len(),
            report.applied,
            report.ignored,
            editor.len(),
            editor.mode()
        );

        let output = if args.pretty {
            export::to_json_pretty(editor.vertices())
        } else {
            export::to_json(editor.vertices())
        };
        println!("{}", output);
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn args(list: &[&str]) -> impl Iterator<Item = String> {
            list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
        }

        #[test]
        fn test_parse_args() {
            let parsed =
                parse_args(args(&["session.json", "--image", "scan.png", "--pretty"])).unwrap();
            assert_eq!(parsed.script, PathBuf::from("session.json"));
            assert_eq!(parsed.image, Some(PathBuf::from("scan.png")));
            assert_eq!(parsed.config, None);
            assert!(parsed.pretty);
        }

        #[test]
        fn test_parse_args_errors() {
            assert!(parse_args(args(&[])).is_err());
            assert!(parse_args(args(&["a.json", "--image"])).is_err());
            assert!(parse_args(args(&["a.json", "--zoom"])).is_err());
            assert!(parse_args(args(&["a.json", "b.json"])).is_err());
        }
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
