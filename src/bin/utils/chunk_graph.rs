// Peregrine Assembler and SHIMMER Genome Assembly Toolkit
// 2019, 2020, 2021- (c) by Jason, Chen-Shan, Chin
//
// This Source Code Form is subject to the terms of the
// Creative Commons Attribution-NonCommercial-ShareAlike 4.0 International License.
//
// You should have received a copy of the license along with this
// work. If not, see <http://creativecommons.org/licenses/by-nc-sa/4.0/>.

#![allow(dead_code)]

//
// order the reads by the length of the best edge chains through them,
// the unitig builder starts from the reads in the longest chains
//

use super::best_overlap::{BestOverlapGraph, ReadEnd};
use super::read_catalog::ReadCatalog;
use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use rustc_hash::FxHashMap;

pub type BestEdgeGraph = DiGraphMap<ReadEnd, ()>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ChunkLength {
    pub read_id: u32,
    pub cnt: u32,
}

pub struct ChunkGraph {
    chunk_lengths: Vec<ChunkLength>,
    path_len: FxHashMap<ReadEnd, u32>,
    pub num_cycles: usize,
}

/// The functional graph of the best edges: every end points at the end we walk out of next.
pub fn best_edge_graph(bog: &BestOverlapGraph, catalog: &ReadCatalog) -> BestEdgeGraph {
    let mut g = BestEdgeGraph::new();
    for rid in 0..catalog.num_reads() as u32 {
        if catalog.is_deleted(rid) || bog.is_contained(rid) {
            continue;
        }
        for &three_prime in &[false, true] {
            let v = ReadEnd::new(rid, three_prime);
            g.add_node(v);
            if let Some(w) = bog.follow_overlap(v) {
                if !catalog.is_deleted(w.id) && !bog.is_contained(w.id) {
                    g.add_edge(v, w, ());
                }
            }
        }
    }
    g
}

impl ChunkGraph {
    pub fn new(bog: &BestOverlapGraph, catalog: &ReadCatalog) -> Self {
        ChunkGraph::from_edge_graph(&best_edge_graph(bog, catalog), catalog.num_reads())
    }

    pub fn from_edge_graph(g: &BestEdgeGraph, num_reads: usize) -> Self {
        let mut path_len = FxHashMap::<ReadEnd, u32>::default();

        // every end on a cycle sees the whole cycle and nothing more
        let mut num_cycles = 0_usize;
        for scc in tarjan_scc(g) {
            // a single end is a cycle only when it points back at itself
            if scc.len() < 2 && !g.contains_edge(scc[0], scc[0]) {
                continue;
            }
            num_cycles += 1;
            log::debug!("chunk graph: best edge cycle of {} ends through {}", scc.len(), scc[0]);
            for v in scc.iter() {
                path_len.insert(*v, scc.len() as u32);
            }
        }

        // out degree is at most one, walk forward until something is known and fill back
        let mut stack = Vec::<ReadEnd>::new();
        for v in g.nodes() {
            if path_len.contains_key(&v) {
                continue;
            }
            stack.clear();
            let mut cur = Some(v);
            let mut base = 0_u32;
            while let Some(c) = cur {
                if let Some(l) = path_len.get(&c) {
                    base = *l;
                    break;
                }
                stack.push(c);
                cur = g.neighbors(c).next();
            }
            while let Some(c) = stack.pop() {
                base += 1;
                path_len.insert(c, base);
            }
        }

        let mut chunk_lengths: Vec<ChunkLength> = (0..num_reads as u32)
            .map(|rid| {
                let p5 = path_len.get(&ReadEnd::five(rid)).copied().unwrap_or(0);
                let p3 = path_len.get(&ReadEnd::three(rid)).copied().unwrap_or(0);
                let cnt = if p5 + p3 > 0 { p5 + p3 - 1 } else { 0 };
                ChunkLength { read_id: rid, cnt }
            })
            .collect();
        chunk_lengths.sort_by(|a, b| b.cnt.cmp(&a.cnt).then(a.read_id.cmp(&b.read_id)));

        if num_cycles > 0 {
            log::info!("chunk graph: {} best edge cycles", num_cycles);
        }
        ChunkGraph {
            chunk_lengths,
            path_len,
            num_cycles,
        }
    }

    /// reads, longest chunk first, ties to the lower id
    pub fn reads_by_chunk_length(&self) -> impl Iterator<Item = u32> + '_ {
        self.chunk_lengths.iter().map(|c| c.read_id)
    }

    pub fn chunk_lengths(&self) -> &[ChunkLength] {
        &self.chunk_lengths
    }

    pub fn path_length(&self, end: ReadEnd) -> u32 {
        self.path_len.get(&end).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::overlap::Overlap;
    use super::super::test_utils::*;
    use super::*;

    #[test]
    fn longer_chains_come_first() {
        // 0-1-2-3 and a lone pair 4-5
        let catalog = catalog_of(&[1000; 6]);
        let mut ovlps = chain_overlaps(&[0, 1, 2, 3], 1000, 500);
        ovlps.push(Overlap::new(4, 5, 500, 500, false, 0.01));
        let bog = build_bog(&catalog, ovlps);
        let cg = ChunkGraph::new(&bog, &catalog);

        assert_eq!(cg.path_length(ReadEnd::three(0)), 4);
        assert_eq!(cg.path_length(ReadEnd::five(0)), 1);
        assert_eq!(cg.path_length(ReadEnd::five(2)), 3);
        let order: Vec<u32> = cg.reads_by_chunk_length().collect();
        assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
        assert!(cg.chunk_lengths().iter().take(4).all(|c| c.cnt == 4));
        assert_eq!(cg.chunk_lengths()[4].cnt, 2);
        assert_eq!(cg.num_cycles, 0);
    }

    #[test]
    fn contained_reads_sort_last() {
        let catalog = catalog_of(&[1000, 1000, 300]);
        let bog = build_bog(
            &catalog,
            vec![
                Overlap::new(0, 1, 500, 500, false, 0.01),
                Overlap::new(0, 2, 100, -600, false, 0.01),
            ],
        );
        let cg = ChunkGraph::new(&bog, &catalog);
        let last = cg.chunk_lengths().last().unwrap();
        assert_eq!((last.read_id, last.cnt), (2, 0));
    }

    #[test]
    fn end_pointing_at_itself_is_a_cycle() {
        let mut g = BestEdgeGraph::new();
        for rid in 0..2 {
            g.add_node(ReadEnd::five(rid));
            g.add_node(ReadEnd::three(rid));
        }
        g.add_edge(ReadEnd::three(0), ReadEnd::three(1), ());
        g.add_edge(ReadEnd::three(1), ReadEnd::three(1), ());
        let cg = ChunkGraph::from_edge_graph(&g, 2);
        assert_eq!(cg.num_cycles, 1);
        assert_eq!(cg.path_length(ReadEnd::three(1)), 1);
        assert_eq!(cg.path_length(ReadEnd::three(0)), 2);
        assert_eq!(cg.chunk_lengths().len(), 2);
    }

    #[test]
    fn read_overlapping_itself_is_ignored() {
        let catalog = catalog_of(&[1000, 1000]);
        let bog = build_bog(
            &catalog,
            vec![
                Overlap::new(0, 1, 500, 500, false, 0.01),
                Overlap::new(1, 1, 300, 300, false, 0.01),
            ],
        );
        assert!(bog.stats.self_overlaps > 0);
        assert_eq!(bog.best_edge(1, false).partner_id(), Some(0));
        assert!(bog.best_edge(1, true).is_empty());
        let cg = ChunkGraph::new(&bog, &catalog);
        assert_eq!(cg.num_cycles, 0);
        assert_eq!(cg.path_length(ReadEnd::three(0)), 2);
        let order: Vec<u32> = cg.reads_by_chunk_length().collect();
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn best_edge_cycle_is_finite() {
        // a circle of four reads
        let catalog = catalog_of(&[1000; 4]);
        let mut ovlps = chain_overlaps(&[0, 1, 2, 3], 1000, 500);
        ovlps.push(Overlap::new(3, 0, 500, 500, false, 0.01));
        let bog = build_bog(&catalog, ovlps);
        let cg = ChunkGraph::new(&bog, &catalog);
        // one cycle through the 3' ends, one back through the 5' ends
        assert_eq!(cg.num_cycles, 2);
        for rid in 0..4 {
            assert_eq!(cg.path_length(ReadEnd::three(rid)), 4);
            assert_eq!(cg.path_length(ReadEnd::five(rid)), 4);
        }
    }
}
