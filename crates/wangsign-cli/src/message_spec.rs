use std::path::PathBuf;
use std::str::FromStr;

use wangsign_core::{DisplayMode, Speed};

/// One `--message` argument: `PATH[,mode=M][,speed=N][,blink|noblink][,border|noborder]`.
///
/// Fields left out fall back to the global `--mode`, `--speed`, `--blink` and
/// `--border` options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSpec {
    pub path: PathBuf,
    pub mode: Option<DisplayMode>,
    pub speed: Option<Speed>,
    pub blink: Option<bool>,
    pub border: Option<bool>,
}

impl FromStr for MessageSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let path = parts.next().unwrap_or_default().trim();
        if path.is_empty() {
            return Err("missing image path".to_string());
        }

        let mut spec = MessageSpec {
            path: PathBuf::from(path),
            mode: None,
            speed: None,
            blink: None,
            border: None,
        };
        for part in parts.map(str::trim) {
            match part.split_once('=') {
                Some(("mode", value)) => {
                    spec.mode = Some(value.parse().map_err(|err| format!("{err}"))?);
                }
                Some(("speed", value)) => {
                    let value: u8 = value
                        .parse()
                        .map_err(|_| format!("invalid speed '{value}' (expected 0-15)"))?;
                    spec.speed = Some(Speed::new(value).map_err(|err| err.to_string())?);
                }
                Some((key, _)) => return Err(format!("unknown message option '{key}'")),
                None => match part {
                    "blink" => spec.blink = Some(true),
                    "noblink" => spec.blink = Some(false),
                    "border" => spec.border = Some(true),
                    "noborder" => spec.border = Some(false),
                    other => return Err(format!("unknown message flag '{other}'")),
                },
            }
        }
        Ok(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_path_has_no_overrides() {
        let spec: MessageSpec = "logo.png".parse().unwrap();
        assert_eq!(spec.path, PathBuf::from("logo.png"));
        assert_eq!(spec.mode, None);
        assert_eq!(spec.speed, None);
        assert_eq!(spec.blink, None);
        assert_eq!(spec.border, None);
    }

    #[test]
    fn options_override_defaults() {
        let spec: MessageSpec = "frames/a.gif, mode=laser, speed=9, blink, noborder"
            .parse()
            .unwrap();
        assert_eq!(spec.path, PathBuf::from("frames/a.gif"));
        assert_eq!(spec.mode, Some(DisplayMode::Laser));
        assert_eq!(spec.speed.map(Speed::get), Some(9));
        assert_eq!(spec.blink, Some(true));
        assert_eq!(spec.border, Some(false));
    }

    #[test]
    fn invalid_fields_are_reported() {
        assert!(
            "a.png,speed=16"
                .parse::<MessageSpec>()
                .unwrap_err()
                .contains("speed out of range")
        );
        assert!(
            "a.png,mode=spin"
                .parse::<MessageSpec>()
                .unwrap_err()
                .contains("unknown display mode")
        );
        assert!(
            "a.png,shiny"
                .parse::<MessageSpec>()
                .unwrap_err()
                .contains("unknown message flag")
        );
        assert!(
            ",blink"
                .parse::<MessageSpec>()
                .unwrap_err()
                .contains("missing image path")
        );
    }
}
