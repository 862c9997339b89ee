//! Undo history of drawn shapes.
//!
//! Shapes are stored as the logical points they cover, never as surface
//! pixels. Undo only edits this list; the owner then clears the surface and
//! repaints every remaining record.

use crate::raster::CircleAlgorithm;
use crate::types::color::Color;
use crate::types::geom::LogicalPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Line,
    Circle(CircleAlgorithm),
}

impl ShapeKind {
    pub fn label(&self) -> String {
        match self {
            Self::Line        => "line".to_string(),
            Self::Circle(alg) => format!("{} circle", alg.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeRecord {
    pub kind:   ShapeKind,
    pub points: Vec<LogicalPoint>,
    pub color:  Color,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShapeHistory {
    undo_stack: Vec<ShapeRecord>,
    redo_stack: Vec<ShapeRecord>,
}

impl ShapeHistory {
    pub fn commit(&mut self, record: ShapeRecord) {
        self.undo_stack.push(record);
        self.redo_stack.clear();
    }

    pub fn undo(&mut self) -> Option<ShapeRecord> {
        let record = self.undo_stack.pop()?;
        self.redo_stack.push(record.clone());
        Some(record)
    }

    pub fn redo(&mut self) -> Option<ShapeRecord> {
        let record = self.redo_stack.pop()?;
        self.undo_stack.push(record.clone());
        Some(record)
    }

    pub fn undo_len(&self) -> usize { self.undo_stack.len() }
    pub fn redo_len(&self) -> usize { self.redo_stack.len() }

    /// Live records, oldest first. This is the repaint order.
    pub fn records(&self) -> &[ShapeRecord] { &self.undo_stack }

    pub fn last(&self) -> Option<&ShapeRecord> { self.undo_stack.last() }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: i32) -> ShapeRecord {
        ShapeRecord {
            kind: ShapeKind::Line,
            points: vec![LogicalPoint::new(id, id), LogicalPoint::new(id + 1, id + 1)],
            color: Color::WHITE,
        }
    }

    #[test]
    fn new_commit_clears_redo_stack() {
        let mut history = ShapeHistory::default();
        history.commit(line(0));
        let _ = history.undo();
        assert_eq!(history.redo_len(), 1);

        history.commit(line(1));
        assert_eq!(history.redo_len(), 0);
        assert_eq!(history.undo_len(), 1);
    }

    #[test]
    fn undo_redo_roundtrip() {
        let mut history = ShapeHistory::default();
        history.commit(line(1));
        history.commit(line(2));

        assert_eq!(history.undo(), Some(line(2)));
        assert_eq!(history.records(), &[line(1)]);
        assert_eq!(history.undo(), Some(line(1)));
        assert_eq!(history.undo(), None);

        assert_eq!(history.redo(), Some(line(1)));
        assert_eq!(history.redo(), Some(line(2)));
        assert_eq!(history.redo(), None);
        assert_eq!(history.undo_len(), 2);
    }

    #[test]
    fn labels() {
        assert_eq!(ShapeKind::Line.label(), "line");
        assert_eq!(ShapeKind::Circle(CircleAlgorithm::Polar).label(), "polar circle");
    }
}
