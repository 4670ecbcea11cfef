use std::{path::Path, time::Duration};

use gridsearch::{Algorithm, HeuristicKind, Point, SearchParams};

/// Everything that decides how a search is run and shown.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)] // settings files only need to contain the fields they change
pub struct Settings {
    pub algorithm: Algorithm,
    pub heuristic: HeuristicKind,
    pub depth_limit: usize,
    /// Print every intermediate grid instead of only the final one
    pub animate: bool,
    pub frame_delay_ms: u64,
    /// Redraw animation frames in place instead of printing them one after
    /// the other
    pub clear_screen: bool,
    /// Cancel the search after this many expansions
    pub max_steps: Option<usize>,
    /// Replaces the start found on the map
    pub start: Option<Point>,
    /// Replaces the end found on the map
    pub goal: Option<Point>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Bfs,
            heuristic: HeuristicKind::Manhattan,
            depth_limit: 20,
            animate: false,
            frame_delay_ms: 50,
            clear_screen: true,
            max_steps: None,
            start: None,
            goal: None,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

        serde_json::from_str(&text)
            .map_err(|e| anyhow::anyhow!("Invalid settings in {}: {}", path.display(), e))
    }

    pub fn params(&self) -> SearchParams {
        SearchParams {
            heuristic: self.heuristic,
            depth_limit: self.depth_limit,
        }
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.frame_delay_ms)
    }
}

/// Parse a point written as `row,col`
pub fn parse_point(s: &str) -> Result<Point, anyhow::Error> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| anyhow::anyhow!("Invalid point: {}, expected row,col", s))?;

    let row = row
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid row in point: {}", s))?;
    let col = col
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid column in point: {}", s))?;

    Ok(Point::new(row, col))
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_partial_settings() {
        let settings: Settings =
            serde_json::from_str(r#"{ "algorithm": "IdaStar", "heuristic": "Euclidean" }"#).unwrap();

        assert_eq!(settings.algorithm, Algorithm::IdaStar);
        assert_eq!(settings.params().heuristic, HeuristicKind::Euclidean);
        assert_eq!(settings.depth_limit, Settings::default().depth_limit);
        assert!(!settings.animate);
    }

    #[test]
    fn test_algorithm_by_display_name() {
        let settings: Settings = serde_json::from_str(r#"{ "algorithm": "A*" }"#).unwrap();
        assert_eq!(settings.algorithm, Algorithm::AStar);

        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains(r#""algorithm":"BFS""#));
        assert!(serde_json::from_str::<Settings>(r#"{ "algorithm": "Dijkstra" }"#).is_err());
    }

    #[test]
    fn test_endpoints_in_settings() {
        let settings: Settings =
            serde_json::from_str(r#"{ "start": { "row": 1, "col": 2 }, "max_steps": 10 }"#).unwrap();

        assert_eq!(settings.start, Some(Point::new(1, 2)));
        assert_eq!(settings.goal, None);
        assert_eq!(settings.max_steps, Some(10));
    }

    #[test]
    fn test_load() {
        let path = std::env::temp_dir().join(format!("gridsearch-settings-{}.json", std::process::id()));
        let written = Settings {
            algorithm: Algorithm::Dls,
            depth_limit: 7,
            frame_delay_ms: 0,
            ..Settings::default()
        };
        std::fs::write(&path, serde_json::to_string(&written).unwrap()).unwrap();

        let loaded = Settings::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.unwrap(), written);
        assert!(Settings::load(Path::new("does/not/exist.json")).is_err());
    }

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("3,4").unwrap(), Point::new(3, 4));
        assert_eq!(parse_point(" 0 , 12 ").unwrap(), Point::new(0, 12));
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,1").is_err());
        assert!(parse_point("1,-1").is_err());
    }
}
