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
// shared fixtures for the unit tests
//

use super::best_overlap::BestOverlapGraph;
use super::overlap::Overlap;
use super::read_catalog::{ReadCatalog, ReadInfo};
use super::unitig::{DoveTailNode, SeqInterval, Unitig};
use super::BogParameters;

pub fn params() -> BogParameters {
    BogParameters::default()
}

pub fn catalog_of(lens: &[u32]) -> ReadCatalog {
    ReadCatalog::from_reads(lens.iter().map(|&l| ReadInfo::new(l, 0, None)).collect())
}

/// every overlap as seen from both reads, the way an overlap store lists them
pub fn symmetric(ovlps: Vec<Overlap>) -> Vec<Overlap> {
    let mut out = Vec::with_capacity(ovlps.len() * 2);
    for o in ovlps {
        out.push(o);
        out.push(o.swapped());
    }
    out
}

pub fn build_bog(catalog: &ReadCatalog, ovlps: Vec<Overlap>) -> BestOverlapGraph {
    let mut ovlps = symmetric(ovlps);
    BestOverlapGraph::build(catalog, &mut ovlps, &params()).unwrap()
}

/// a chain of reads of one length, each one overlapping the next by `ovl` bases
pub fn chain_overlaps(ids: &[u32], len: u32, ovl: u32) -> Vec<Overlap> {
    let hang = (len - ovl) as i32;
    ids.windows(2)
        .map(|w| Overlap::new(w[0], w[1], hang, hang, false, 0.01))
        .collect()
}

/// a dovetail node at a fixed place, for building unitigs by hand
pub fn node(ident: u32, bgn: i32, end: i32) -> DoveTailNode {
    DoveTailNode::new(ident, SeqInterval::new(bgn, end))
}

pub fn unitig_of(id: u32, nodes: Vec<DoveTailNode>) -> Unitig {
    let mut utg = Unitig::new(id);
    for n in nodes {
        utg.add_frag(n, 0);
    }
    utg
}

pub fn path_ids(utg: &Unitig) -> Vec<u32> {
    utg.dovetail_path().iter().map(|n| n.ident).collect()
}
