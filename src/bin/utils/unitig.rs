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
// a unitig is an ordered path of dovetailing reads plus the reads contained in them
//

use std::fmt;

/// begin > end means the read is placed reverse complemented
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SeqInterval {
    pub bgn: i32,
    pub end: i32,
}

impl SeqInterval {
    pub fn new(bgn: i32, end: i32) -> Self {
        SeqInterval { bgn, end }
    }
    #[inline]
    pub fn is_reverse(&self) -> bool {
        self.bgn > self.end
    }
    #[inline]
    pub fn min(&self) -> i32 {
        self.bgn.min(self.end)
    }
    #[inline]
    pub fn max(&self) -> i32 {
        self.bgn.max(self.end)
    }
    #[inline]
    pub fn len(&self) -> i32 {
        (self.bgn - self.end).abs()
    }
    pub fn shifted(&self, offset: i32) -> Self {
        SeqInterval::new(self.bgn + offset, self.end + offset)
    }
}

impl fmt::Display for SeqInterval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.bgn, self.end)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DoveTailNode {
    pub ident: u32,
    // the container if the read was placed as a containee
    pub contained: Option<u32>,
    pub parent: Option<u32>,
    pub a_hang: i32,
    pub b_hang: i32,
    pub position: SeqInterval,
}

impl DoveTailNode {
    pub fn new(ident: u32, position: SeqInterval) -> Self {
        DoveTailNode {
            ident,
            contained: None,
            parent: None,
            a_hang: 0,
            b_hang: 0,
            position,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Unitig {
    id: u32,
    dovetail_path: Vec<DoveTailNode>,
    contains: Vec<DoveTailNode>,
}

impl Unitig {
    pub fn new(id: u32) -> Self {
        Unitig {
            id,
            dovetail_path: Vec::new(),
            contains: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn dovetail_path(&self) -> &[DoveTailNode] {
        &self.dovetail_path
    }

    pub fn contains(&self) -> &[DoveTailNode] {
        &self.contains
    }

    pub fn dovetail_path_mut(&mut self) -> &mut [DoveTailNode] {
        &mut self.dovetail_path
    }

    pub fn contains_mut(&mut self) -> &mut [DoveTailNode] {
        &mut self.contains
    }

    pub(crate) fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    /// every placed read, path and contained, ordered by the left coordinate
    pub fn placed_reads(&self) -> Vec<DoveTailNode> {
        let mut all: Vec<DoveTailNode> = self
            .dovetail_path
            .iter()
            .chain(self.contains.iter())
            .copied()
            .collect();
        all.sort_by_key(|n| n.position.min());
        all
    }

    /// Append a read to the path, shifted by `offset`.
    pub fn add_frag(&mut self, mut node: DoveTailNode, offset: i32) {
        node.position = node.position.shifted(offset);
        log::debug!("unitig {}: add {} at {}", self.id, node.ident, node.position);
        self.dovetail_path.push(node);
    }

    /// Place a contained read, its container has to be in this unitig already.
    pub fn add_contained(&mut self, mut node: DoveTailNode, offset: i32) {
        node.position = node.position.shifted(offset);
        self.contains.push(node);
    }

    pub fn num_frags(&self) -> usize {
        self.dovetail_path.len() + self.contains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dovetail_path.is_empty()
    }

    pub fn length(&self) -> i32 {
        self.dovetail_path
            .iter()
            .chain(self.contains.iter())
            .map(|n| n.position.max())
            .max()
            .unwrap_or(0)
    }

    pub fn first(&self) -> Option<&DoveTailNode> {
        self.dovetail_path.first()
    }

    pub fn last(&self) -> Option<&DoveTailNode> {
        self.dovetail_path.last()
    }

    /// index on the dovetail path
    pub fn path_index(&self, ident: u32) -> Option<usize> {
        self.dovetail_path.iter().position(|n| n.ident == ident)
    }

    pub fn find_placed(&self, ident: u32) -> Option<&DoveTailNode> {
        self.dovetail_path
            .iter()
            .chain(self.contains.iter())
            .find(|n| n.ident == ident)
    }

    pub fn reverse_complement(&mut self) {
        let len = self.length();
        for n in self.dovetail_path.iter_mut().chain(self.contains.iter_mut()) {
            n.position = SeqInterval::new(len - n.position.bgn, len - n.position.end);
        }
        self.dovetail_path.reverse();
        self.contains.sort_by_key(|n| n.position.min());
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::*;
    use super::*;

    #[test]
    fn reverse_complement_keeps_order_and_span() {
        let mut utg = unitig_of(0, vec![node(1, 1000, 0), node(2, 500, 1500), node(3, 1000, 2000)]);
        assert_eq!(utg.length(), 2000);
        utg.reverse_complement();
        assert_eq!(path_ids(&utg), vec![3, 2, 1]);
        let p = utg.dovetail_path();
        assert_eq!(p[0].position, SeqInterval::new(1000, 0));
        assert_eq!(p[1].position, SeqInterval::new(1500, 500));
        assert_eq!(p[2].position, SeqInterval::new(1000, 2000));
        assert!(!p[2].position.is_reverse());
        assert_eq!(utg.length(), 2000);
    }

    #[test]
    fn add_frag_shifts_positions() {
        let mut utg = Unitig::new(7);
        utg.add_frag(node(4, 1300, 300), -300);
        assert_eq!(utg.first().unwrap().position, SeqInterval::new(1000, 0));
        assert_eq!(utg.id(), 7);
        assert_eq!(utg.num_frags(), 1);
    }
}
