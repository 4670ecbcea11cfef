use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::grid::{CellKind, Grid};

/// Build a grid from an image, dark pixels become barriers
pub fn parse_img(img: &DynamicImage) -> Result<Grid, anyhow::Error> {
    let width = img.width() as usize;
    let height = img.height() as usize;

    let mut cells = vec![vec![CellKind::Empty; width]; height];

    for (row, line) in cells.iter_mut().enumerate() {
        for (col, cell) in line.iter_mut().enumerate() {
            let p = img.get_pixel(col as u32, row as u32);

            if p.0[0] < 128 {
                *cell = CellKind::Barrier;
            }
        }
    }

    Grid::from_cells(cells)
}

/// Load a grid from disk. `.txt` and `.map` files are read as text maps,
/// anything else is opened as an image.
pub fn load_map(path: &Path) -> Result<Grid, anyhow::Error> {
    let is_text = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("txt") | Some("map")
    );

    if is_text {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        text.parse()
    } else {
        let img = image::open(path)?;
        parse_img(&img)
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::grid::Point;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_parse_img() {
        let mut img = RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
        img.put_pixel(1, 0, Rgb([0, 0, 0]));
        img.put_pixel(2, 1, Rgb([100, 200, 200]));

        let grid = parse_img(&DynamicImage::ImageRgb8(img)).unwrap();

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.kind(Point::new(0, 1)), CellKind::Barrier);
        assert_eq!(grid.kind(Point::new(1, 2)), CellKind::Barrier);
        assert_eq!(grid.to_string(), ".#.\n..#\n");
    }

    #[test]
    fn test_load_text_map() {
        let path = std::env::temp_dir().join(format!("gridsearch-{}.map", std::process::id()));
        std::fs::write(&path, "S.#\n..E\n").unwrap();

        let grid = load_map(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(grid.find(CellKind::Start), Some(Point::new(0, 0)));
        assert_eq!(grid.find(CellKind::End), Some(Point::new(1, 2)));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_map(Path::new("does/not/exist.txt")).is_err());
        assert!(load_map(Path::new("does/not/exist.png")).is_err());
    }
}
