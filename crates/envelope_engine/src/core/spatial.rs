//! Spatial-Index (KD-Tree) für die Nearest-Breakpoint-Suche.

use glam::Vec2;
use indexmap::IndexMap;
use kiddo::{KdTree, SquaredEuclidean};

use super::Breakpoint;

/// Ergebnis einer Distanzabfrage gegen den Spatial-Index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialMatch {
    /// Listenindex des gefundenen Breakpoints
    pub index: usize,
    /// Euklidische Distanz (normalisierte Koordinaten) zum Suchpunkt
    pub distance: f32,
}

/// Read-only Spatial-Index über allen Breakpoints einer Hüllkurve.
///
/// Zusammenfallende Breakpoints werden als ein Eintrag geführt, der auf den
/// kleinsten Listenindex zeigt. Der Index muss nach jeder Mutation neu gebaut
/// werden.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 2>,
    /// Tree-Item → Listenindex
    node_indices: Vec<usize>,
    len: usize,
}

impl SpatialIndex {
    /// Erstellt einen leeren Spatial-Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            node_indices: Vec::new(),
            len: 0,
        }
    }

    /// Baut einen neuen Index aus der geordneten Breakpoint-Liste.
    pub fn from_nodes(nodes: &[Breakpoint]) -> Self {
        // kiddo erlaubt höchstens 32 Items an exakt derselben Position.
        // `+ 0.0` fasst -0.0 und 0.0 zu einem Schlüssel zusammen.
        let mut unique: IndexMap<(u32, u32), usize> = IndexMap::new();
        for (index, node) in nodes.iter().enumerate() {
            unique
                .entry(((node.x() + 0.0).to_bits(), (node.y() + 0.0).to_bits()))
                .or_insert(index);
        }

        let entries: Vec<[f64; 2]> = unique
            .keys()
            .map(|&(x, y)| [f32::from_bits(x) as f64, f32::from_bits(y) as f64])
            .collect();

        Self {
            tree: (&entries).into(),
            node_indices: unique.into_values().collect(),
            len: nodes.len(),
        }
    }

    /// Gibt die Anzahl indexierter Breakpoints zurück.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Gibt `true` zurück, wenn keine Breakpoints im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Findet den nächsten Breakpoint zur normalisierten Position.
    pub fn nearest(&self, query: Vec2) -> Option<SpatialMatch> {
        if self.is_empty() {
            return None;
        }

        let result = self
            .tree
            .nearest_one::<SquaredEuclidean>(&[query.x as f64, query.y as f64]);
        let item = usize::try_from(result.item).ok()?;
        let index = *self.node_indices.get(item)?;

        Some(SpatialMatch {
            index,
            distance: (result.distance as f32).sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::MarkerId;

    fn sample_nodes() -> Vec<Breakpoint> {
        [(0.1, 0.4), (0.35, 0.6), (0.65, 0.2)]
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Breakpoint::new(Vec2::new(x, y), 1.0, MarkerId::new(i as u64)))
            .collect()
    }

    #[test]
    fn nearest_returns_expected_index() {
        let index = SpatialIndex::from_nodes(&sample_nodes());
        let nearest = index
            .nearest(Vec2::new(0.36, 0.58))
            .expect("Treffer erwartet");

        assert_eq!(nearest.index, 1);
        assert!(nearest.distance < 0.03);
    }

    #[test]
    fn coincident_nodes_map_to_lowest_index() {
        let mut nodes = sample_nodes();
        for i in 0..40 {
            nodes.push(Breakpoint::new(
                Vec2::new(1.0, 1.0),
                1.0,
                MarkerId::new(100 + i),
            ));
        }

        let index = SpatialIndex::from_nodes(&nodes);
        assert_eq!(index.len(), 43);

        let nearest = index
            .nearest(Vec2::new(0.99, 0.99))
            .expect("Treffer erwartet");
        assert_eq!(nearest.index, 3);
        assert_eq!(
            index.nearest(Vec2::new(0.1, 0.4)).map(|m| m.index),
            Some(0)
        );
    }

    #[test]
    fn empty_index_has_no_entries() {
        let index = SpatialIndex::empty();

        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.nearest(Vec2::new(0.5, 0.5)).is_none());
    }
}
