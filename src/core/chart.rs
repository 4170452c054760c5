use super::models::{
    DisplayRecord,
    Stat,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub axis: String,
    pub value: f32,
}

/// Dataset behind the radar chart: one point per numeric attribute, in record
/// order, scaled against a fixed ceiling.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub label: String,
    pub points: Vec<ChartPoint>,
    pub ceiling: f32,
}

impl ChartData {
    pub fn from_stats(label: impl Into<String>, stats: &[Stat], ceiling: f32) -> Self {
        Self {
            label: label.into(),
            points: stats
                .iter()
                .map(|stat| ChartPoint { axis: stat.name.clone(), value: stat.value })
                .collect(),
            ceiling: if ceiling > 0.0 { ceiling } else { 1.0 },
        }
    }

    pub fn from_record(record: &DisplayRecord, ceiling: f32) -> Self {
        Self::from_stats(record.name.clone(), &record.stats, ceiling)
    }

    /// Position of each point along its axis, `0.0..=1.0`. Values over the
    /// ceiling are clamped to the rim.
    pub fn normalized(&self) -> Vec<f32> {
        self.points.iter().map(|p| (p.value / self.ceiling).clamp(0.0, 1.0)).collect()
    }

    /// A radar needs at least three axes to enclose an area.
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 3
    }
}
