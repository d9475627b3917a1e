// Peregrine Assembler and SHIMMER Genome Assembly Toolkit
// 2019, 2020, 2021- (c) by Jason, Chen-Shan, Chin
//
// This Source Code Form is subject to the terms of the
// Creative Commons Attribution-NonCommercial-ShareAlike 4.0 International License.
//
// You should have received a copy of the license along with this
// work. If not, see <http://creativecommons.org/licenses/by-nc-sa/4.0/>.

#![allow(dead_code)]

use super::best_overlap::BestOverlapGraph;
use super::error::BogError;
use super::unitig::DoveTailNode;
use super::unitig_graph::UnitigGraph;
use std::fs::File;
use std::io::{BufWriter, Write};

fn opt_id(v: Option<u32>) -> String {
    match v {
        Some(v) => format!("{}", v),
        None => "-".to_string(),
    }
}

/// Fill partitions in unitig order up to `target` reads; 0 keeps everything in one.
pub fn assign_partitions(sizes: &[u32], target: u32) -> Vec<u32> {
    let mut parts = Vec::with_capacity(sizes.len());
    let mut partition = 1_u32;
    let mut count = 0_u32;
    for &s in sizes {
        count += s;
        if target > 0 && count >= target && count > s {
            partition += 1;
            count = s;
        }
        parts.push(partition);
    }
    parts
}

pub fn log_unitig_summary(mut lengths: Vec<usize>) {
    lengths.sort_unstable();
    lengths.reverse();
    let total_bases: usize = lengths.iter().sum();
    let total_utgs = lengths.len();
    let mut n50 = 0_usize;
    let mut n90 = 0_usize;
    let mut count_gt_10kb = 0_u32;
    log::info!("Total size: {}", total_bases);
    log::info!("Longest size: {}", lengths.get(0).unwrap_or(&0));
    let mut cumsum = 0_usize;
    for l in lengths {
        cumsum += l;
        if n50 == 0 && cumsum as f64 > total_bases as f64 * 0.5 {
            n50 = l;
        }
        if n90 == 0 && cumsum as f64 > total_bases as f64 * 0.9 {
            n90 = l;
        }
        if l > 10000 {
            count_gt_10kb += 1;
        }
    }
    log::info!("N50: {}", n50);
    log::info!("N90: {}", n90);
    log::info!("Number of unitigs: {}", total_utgs);
    log::info!("Number of unitigs > 10kb: {}", count_gt_10kb);
}

/// Write `{prefix}_utg.dat` and the partition files; unitigs are numbered
/// densely in output order.
pub fn write_unitigs(
    graph: &UnitigGraph,
    prefix: &str,
    frg_count_target: u32,
) -> Result<usize, BogError> {
    let mut utg_file = BufWriter::new(File::create(format!("{}_utg.dat", prefix))?);
    let mut iid_file = BufWriter::new(File::create(format!("{}.iidmap", prefix))?);
    let mut part_file = BufWriter::new(File::create(format!("{}.partitioning", prefix))?);
    let mut info_file = BufWriter::new(File::create(format!("{}.partitioningInfo", prefix))?);

    let unitigs: Vec<_> = graph.unitigs().filter(|u| u.num_frags() > 0).collect();
    let sizes: Vec<u32> = unitigs.iter().map(|u| u.num_frags() as u32).collect();
    let parts = assign_partitions(&sizes, frg_count_target);

    let mut lengths = Vec::with_capacity(unitigs.len());
    let mut part_utgs = 0_u32;
    let mut part_frags = 0_u32;
    for (iid, (utg, &part)) in unitigs.iter().zip(parts.iter()).enumerate() {
        if iid > 0 && parts[iid - 1] != part {
            writeln!(
                info_file,
                "Partition {} has {} unitigs and {} fragments.",
                parts[iid - 1],
                part_utgs,
                part_frags
            )?;
            part_utgs = 0;
            part_frags = 0;
        }
        part_utgs += 1;
        part_frags += utg.num_frags() as u32;

        writeln!(utg_file, "U {} {} {}", iid, utg.length(), utg.num_frags())?;
        let mut nodes: Vec<&DoveTailNode> = utg
            .dovetail_path()
            .iter()
            .chain(utg.contains().iter())
            .collect();
        nodes.sort_by_key(|n| (n.position.min(), n.contained.is_some()));
        for n in nodes {
            writeln!(
                utg_file,
                "F {} {} {} {} {} {} {}",
                n.ident,
                opt_id(n.contained),
                opt_id(n.parent),
                n.a_hang,
                n.b_hang,
                n.position.bgn,
                n.position.end
            )?;
            writeln!(part_file, "{} {}", part, n.ident)?;
        }
        writeln!(
            iid_file,
            "Unitig {} == IUM {} (with {} frags)",
            utg.id(),
            iid,
            utg.num_frags()
        )?;
        lengths.push(utg.length().max(0) as usize);
    }
    if let Some(&last) = parts.last() {
        writeln!(
            info_file,
            "Partition {} has {} unitigs and {} fragments.",
            last, part_utgs, part_frags
        )?;
    }

    utg_file.flush()?;
    iid_file.flush()?;
    part_file.flush()?;
    info_file.flush()?;
    log::info!(
        "wrote {} unitigs in {} partitions to {}_utg.dat",
        unitigs.len(),
        parts.last().copied().unwrap_or(0),
        prefix
    );
    log_unitig_summary(lengths);
    Ok(unitigs.len())
}

/// Best edges of dovetail reads that leave their unitig, to `{prefix}.unused.best`.
pub fn write_unused_best_edges(
    graph: &UnitigGraph,
    bog: &BestOverlapGraph,
    prefix: &str,
) -> Result<usize, BogError> {
    let mut out = BufWriter::new(File::create(format!("{}.unused.best", prefix))?);
    let mut cnt = 0_usize;
    for utg in graph.unitigs() {
        for n in utg.dovetail_path() {
            for &three_prime in [false, true].iter() {
                let e = bog.best_edge(n.ident, three_prime);
                let p = match e.partner() {
                    Some(p) => p,
                    None => continue,
                };
                if graph.frag_in(p.id) == Some(utg.id()) {
                    continue;
                }
                writeln!(
                    out,
                    "{} {} {} {} {} {}",
                    n.ident,
                    if three_prime { 3 } else { 5 },
                    p.id,
                    if p.three_prime { 3 } else { 5 },
                    e.a_hang(),
                    e.b_hang()
                )?;
                cnt += 1;
            }
        }
    }
    out.flush()?;
    log::info!("{} best edges leave their unitig", cnt);
    Ok(cnt)
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::*;
    use super::*;

    #[test]
    fn partitions_fill_greedily() {
        assert_eq!(assign_partitions(&[3, 2, 4], 0), vec![1, 1, 1]);
        assert_eq!(assign_partitions(&[3, 2, 4], 6), vec![1, 1, 2]);
        assert_eq!(assign_partitions(&[3, 2, 4], 2), vec![1, 2, 3]);
        assert_eq!(assign_partitions(&[7, 1], 5), vec![1, 2]);
    }

    #[test]
    fn unitig_layout_is_written() {
        let mut utg = unitig_of(0, vec![node(0, 0, 1000), node(1, 1500, 500)]);
        let mut c = node(2, 600, 900);
        c.contained = Some(1);
        c.parent = Some(1);
        utg.add_contained(c, 0);
        let g = UnitigGraph::from_unitigs(4, vec![utg, unitig_of(1, vec![node(3, 0, 800)])]);
        let prefix = std::env::temp_dir()
            .join(format!("bog_layout_{}", std::process::id()))
            .to_string_lossy()
            .to_string();
        assert_eq!(write_unitigs(&g, &prefix, 0).unwrap(), 2);

        let text = std::fs::read_to_string(format!("{}_utg.dat", prefix)).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "U 0 1500 3");
        assert_eq!(lines[1], "F 0 - - 0 0 0 1000");
        assert_eq!(lines[2], "F 1 - - 0 0 1500 500");
        assert_eq!(lines[3], "F 2 1 1 0 0 600 900");
        assert_eq!(lines[4], "U 1 800 1");
        let info = std::fs::read_to_string(format!("{}.partitioningInfo", prefix)).unwrap();
        assert_eq!(info.trim(), "Partition 1 has 2 unitigs and 4 fragments.");

        for ext in ["_utg.dat", ".iidmap", ".partitioning", ".partitioningInfo"].iter() {
            std::fs::remove_file(format!("{}{}", prefix, ext)).unwrap();
        }
    }
}
