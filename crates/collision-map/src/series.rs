//! Named (couch, gantry) series and the chart layout handed to the renderer.
//!
//! Output contract
//! - One series per tested structure (named by structure id), then "Planned Arcs".
//! - Points keep insertion order; nothing is sorted or deduplicated here.
//! - Both axes span [-1, 360].

use serde::{Deserialize, Serialize};

use crate::cfg::{MapCfg, PLANNED_ARCS};
use crate::geom::{AnglePair, CollisionPoint};

/// Scatter series for the chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AngleSeries {
    pub name: String,
    pub marker_size: u32,
    pub points: Vec<AnglePair>,
}

impl AngleSeries {
    /// Collision points of one structure.
    pub fn for_structure(id: &str, points: &[CollisionPoint], cfg: &MapCfg) -> Self {
        Self {
            name: id.to_string(),
            marker_size: cfg.structure_marker_size,
            points: points.iter().map(|p| p.angles).collect(),
        }
    }

    /// Trajectories of all planned arcs.
    pub fn planned_arcs(points: Vec<AnglePair>, cfg: &MapCfg) -> Self {
        Self {
            name: PLANNED_ARCS.to_string(),
            marker_size: cfg.arc_marker_size,
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisPosition {
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
    pub position: AxisPosition,
    pub min: f64,
    pub max: f64,
}

impl Axis {
    fn angle(title: &str, position: AxisPosition) -> Self {
        Self {
            title: title.to_string(),
            position,
            min: -1.0,
            max: 360.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendPlacement {
    Inside,
    Outside,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendPosition {
    RightTop,
    RightBottom,
    LeftTop,
    LeftBottom,
}

/// Fixed axes and legend placement of the collision chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub legend_placement: LegendPlacement,
    pub legend_position: LegendPosition,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            title: "Collision Points".to_string(),
            x_axis: Axis::angle("Couch Angle", AxisPosition::Bottom),
            y_axis: Axis::angle("Gantry Angle", AxisPosition::Left),
            legend_placement: LegendPlacement::Outside,
            legend_position: LegendPosition::RightTop,
        }
    }
}

/// Everything the renderer needs: layout plus series in legend order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollisionMap {
    pub layout: ChartLayout,
    pub series: Vec<AngleSeries>,
}

impl CollisionMap {
    pub fn new(series: Vec<AngleSeries>) -> Self {
        Self {
            layout: ChartLayout::default(),
            series,
        }
    }

    pub fn series(&self, name: &str) -> Option<&AngleSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Legend entries in display order.
    pub fn legend(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn summary(&self) -> MapSummary {
        let counts = self
            .series
            .iter()
            .map(|s| (s.name.clone(), s.len()))
            .collect();
        let mut extent: Option<Extent> = None;
        for p in self.series.iter().flat_map(|s| &s.points) {
            match extent.as_mut() {
                Some(e) => e.include(*p),
                None => extent = Some(Extent::at(*p)),
            }
        }
        MapSummary { counts, extent }
    }
}

/// Bounding box of all points on the map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub couch_min: f64,
    pub couch_max: f64,
    pub gantry_min: f64,
    pub gantry_max: f64,
}

impl Extent {
    fn at(p: AnglePair) -> Self {
        Self {
            couch_min: p.couch,
            couch_max: p.couch,
            gantry_min: p.gantry,
            gantry_max: p.gantry,
        }
    }

    fn include(&mut self, p: AnglePair) {
        self.couch_min = self.couch_min.min(p.couch);
        self.couch_max = self.couch_max.max(p.couch);
        self.gantry_min = self.gantry_min.min(p.gantry);
        self.gantry_max = self.gantry_max.max(p.gantry);
    }
}

/// Point counts per series and overall extent (`None` if the map has no points).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapSummary {
    pub counts: Vec<(String, usize)>,
    pub extent: Option<Extent>,
}

impl MapSummary {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec3;

    fn cp(couch: f64, gantry: f64) -> CollisionPoint {
        CollisionPoint {
            position: Vec3::zeros(),
            angles: AnglePair::new(couch, gantry),
        }
    }

    #[test]
    fn series_carry_names_and_marker_sizes() {
        let cfg = MapCfg::default();
        let body = AngleSeries::for_structure("BODY", &[cp(10.0, 20.0), cp(5.0, 1.0)], &cfg);
        assert_eq!(body.name, "BODY");
        assert_eq!(body.marker_size, 4);
        assert_eq!(
            body.points,
            [AnglePair::new(10.0, 20.0), AnglePair::new(5.0, 1.0)]
        );
        let arcs = AngleSeries::planned_arcs(vec![], &cfg);
        assert_eq!(arcs.name, "Planned Arcs");
        assert_eq!(arcs.marker_size, 2);
        assert!(arcs.is_empty());
    }

    #[test]
    fn layout_matches_chart_contract() {
        let layout = ChartLayout::default();
        assert_eq!(layout.x_axis.title, "Couch Angle");
        assert_eq!(layout.y_axis.title, "Gantry Angle");
        for axis in [&layout.x_axis, &layout.y_axis] {
            assert_eq!((axis.min, axis.max), (-1.0, 360.0));
        }
        assert_eq!(layout.legend_placement, LegendPlacement::Outside);
        assert_eq!(layout.legend_position, LegendPosition::RightTop);
    }

    #[test]
    fn summary_counts_and_extent() {
        let cfg = MapCfg::default();
        let map = CollisionMap::new(vec![
            AngleSeries::for_structure("BODY", &[cp(10.0, 20.0), cp(300.0, -0.05)], &cfg),
            AngleSeries::planned_arcs(vec![AnglePair::new(0.0, 180.0)], &cfg),
        ]);
        assert_eq!(map.legend(), ["BODY", "Planned Arcs"]);
        let s = map.summary();
        assert_eq!(s.total(), 3);
        assert_eq!(s.counts[1], ("Planned Arcs".to_string(), 1));
        let e = s.extent.unwrap();
        assert_eq!((e.couch_min, e.couch_max), (0.0, 300.0));
        assert_eq!((e.gantry_min, e.gantry_max), (-0.05, 180.0));

        let empty = CollisionMap::new(vec![AngleSeries::planned_arcs(vec![], &cfg)]);
        assert!(empty.summary().extent.is_none());
    }
}
