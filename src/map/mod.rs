use crate::geo::resolve_coordinates;
use crate::models::{Coordinates, Hostel, NearbyHostel, University};
use rand::Rng;
use serde::Serialize;
use std::f64::consts::TAU;
use std::fmt::Write as _;

/// A hostel marker; `None` when the location could not be placed
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapPoint {
    pub name: String,
    pub coordinates: Option<Coordinates>,
}

/// Resolves every hostel to a marker, keeping unplaceable ones as placeholders
pub fn map_points<R: Rng>(hostels: &[Hostel], rng: &mut R) -> Vec<MapPoint> {
    hostels
        .iter()
        .map(|hostel| MapPoint {
            name: hostel.name.clone(),
            coordinates: resolve_coordinates(&hostel.location, rng),
        })
        .collect()
}

/// Markers for proximity results, at the positions their distances were measured from
pub fn nearby_points(nearby: &[NearbyHostel]) -> Vec<MapPoint> {
    nearby
        .iter()
        .map(|n| MapPoint {
            name: n.hostel.name.clone(),
            coordinates: Some(n.coordinates),
        })
        .collect()
}

/// Surface that draws hostel markers around an optional focus university
pub trait MarkerRenderer {
    fn render_markers(&mut self, points: &[MapPoint], focus: Option<&University>);
}

/// Offline, decorative map drawn into a character grid.
///
/// Markers are spread on a circle around the centre in input order rather
/// than projected from their coordinates; the legend lists the real positions.
pub struct TextMapRenderer {
    rows: usize,
    cols: usize,
    output: String,
}

impl Default for TextMapRenderer {
    fn default() -> Self {
        Self::new(15, 41)
    }
}

impl TextMapRenderer {
    const LABEL_LIMIT: usize = 25;
    const RING: f64 = 0.3;
    const ORBIT: f64 = 0.2;

    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: rows.max(5),
            cols: cols.max(9),
            output: String::new(),
        }
    }

    /// The most recent rendering
    pub fn output(&self) -> &str {
        &self.output
    }

    fn cell(&self, x: f64, y: f64) -> (usize, usize) {
        let col = (x * (self.cols - 1) as f64).round() as usize;
        let row = (y * (self.rows - 1) as f64).round() as usize;
        (row.min(self.rows - 1), col.min(self.cols - 1))
    }
}

impl MarkerRenderer for TextMapRenderer {
    fn render_markers(&mut self, points: &[MapPoint], focus: Option<&University>) {
        let mut grid = vec![vec!['.'; self.cols]; self.rows];

        if focus.is_some() {
            for step in 0..72 {
                let angle = TAU * step as f64 / 72.0;
                let (row, col) =
                    self.cell(0.5 + angle.cos() * Self::RING, 0.5 + angle.sin() * Self::RING);
                grid[row][col] = '~';
            }
            let (row, col) = self.cell(0.5, 0.5);
            grid[row][col] = 'U';
        }

        for (index, _) in points.iter().enumerate() {
            let angle = TAU * index as f64 / points.len() as f64;
            let (row, col) =
                self.cell(0.5 + angle.cos() * Self::ORBIT, 0.5 + angle.sin() * Self::ORBIT);
            grid[row][col] = marker_symbol(index);
        }

        let mut out = String::new();
        for row in &grid {
            out.extend(row.iter());
            out.push('\n');
        }

        if let Some(university) = focus {
            let _ = writeln!(out, "U  {}", truncate(&university.name, Self::LABEL_LIMIT));
        }
        for (index, point) in points.iter().enumerate() {
            let _ = match point.coordinates {
                Some(c) => writeln!(
                    out,
                    "{}  {} ({:.4}, {:.4})",
                    marker_symbol(index),
                    point.name,
                    c.lat,
                    c.lng
                ),
                None => writeln!(out, "{}  {} (location unknown)", marker_symbol(index), point.name),
            };
        }

        self.output = out;
    }
}

fn marker_symbol(index: usize) -> char {
    match index {
        0..=8 => (b'1' + index as u8) as char,
        9..=34 => (b'a' + (index - 9) as u8) as char,
        _ => '*',
    }
}

fn truncate(label: &str, limit: usize) -> String {
    if label.chars().count() > limit {
        let short: String = label.chars().take(limit).collect();
        format!("{}...", short)
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn unplaceable_hostels_keep_a_placeholder() {
        let mut hostels = data::hostels()[..2].to_vec();
        hostels[1].location = "Nowhere, Land".to_string();

        let points = map_points(&hostels, &mut StdRng::seed_from_u64(1));
        assert!(points[0].coordinates.is_some());
        assert_eq!(points[1].coordinates, None);
    }

    #[test]
    fn nearby_markers_sit_where_they_were_measured() {
        let university = data::university_by_id(1).unwrap();
        let nearby = crate::search::hostels_near(
            1,
            data::universities(),
            data::hostels(),
            10.0,
            &mut StdRng::seed_from_u64(5),
        );
        assert!(!nearby.is_empty());

        let points = nearby_points(&nearby);
        for (point, hostel) in points.iter().zip(&nearby) {
            let position = point.coordinates.unwrap();
            assert_eq!(position, hostel.coordinates);
            assert!(crate::geo::haversine_distance(university.coordinates, position) <= 10.0);
        }
    }

    #[test]
    fn renders_focus_markers_and_legend() {
        let points = vec![
            MapPoint {
                name: "Alpha".to_string(),
                coordinates: Some(Coordinates::new(28.6, 77.2)),
            },
            MapPoint {
                name: "Beta".to_string(),
                coordinates: None,
            },
        ];
        let university = data::university_by_id(1).unwrap();

        let mut renderer = TextMapRenderer::default();
        renderer.render_markers(&points, Some(university));
        let out = renderer.output();

        assert!(out.contains('U'));
        assert!(out.contains('~'));
        assert!(out.contains("U  Indian Institute of Techn..."));
        assert!(out.contains("1  Alpha (28.6000, 77.2000)"));
        assert!(out.contains("2  Beta (location unknown)"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let points = map_points(data::hostels(), &mut StdRng::seed_from_u64(9));

        let mut first = TextMapRenderer::default();
        first.render_markers(&points, None);
        let mut second = TextMapRenderer::default();
        second.render_markers(&points, None);

        assert_eq!(first.output(), second.output());
        let grid: Vec<&str> = first.output().lines().take(15).collect();
        assert!(grid.iter().all(|line| !line.contains('U') && !line.contains('~')));
        assert!(grid.iter().any(|line| line.contains('a')));
    }

    #[test]
    fn marker_symbols_run_digits_then_letters() {
        assert_eq!(marker_symbol(0), '1');
        assert_eq!(marker_symbol(9), 'a');
        assert_eq!(marker_symbol(40), '*');
    }
}
