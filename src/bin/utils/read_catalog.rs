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
// per read metadata the graph engine needs: length, library and mate
//

use super::error::BogError;
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ReadInfo {
    pub len: u32,
    pub lib: u32,
    pub mate: Option<u32>,
}

impl ReadInfo {
    pub fn new(len: u32, lib: u32, mate: Option<u32>) -> Self {
        ReadInfo { len, lib, mate }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReadCatalog {
    reads: Vec<ReadInfo>,
}

fn read_lines<P>(filename: P) -> io::Result<io::Lines<io::BufReader<File>>>
where
    P: AsRef<Path>,
{
    let file = File::open(filename)?;
    Ok(io::BufReader::new(file).lines())
}

impl ReadCatalog {
    pub fn from_reads(reads: Vec<ReadInfo>) -> Self {
        ReadCatalog { reads }
    }

    pub fn load<P: AsRef<Path>>(filename: P) -> Result<Self, BogError> {
        // R <rid> <len> <lib> <mate|->
        let fname = filename.as_ref().to_string_lossy().to_string();
        let mut reads = Vec::<ReadInfo>::new();
        for (lnum, line) in read_lines(&filename)?.enumerate() {
            let line = line?;
            let v: Vec<&str> = line.split_whitespace().collect();
            if v.is_empty() || v[0] != "R" {
                continue;
            }
            if v.len() < 5 {
                return Err(BogError::parse(&fname, lnum + 1, "expect 5 fields in a read record"));
            }
            let field = |i: usize| -> Result<u32, BogError> {
                v[i].parse::<u32>().map_err(|e| {
                    BogError::parse(&fname, lnum + 1, format!("field {} `{}`: {}", i, v[i], e))
                })
            };
            let rid = field(1)?;
            if rid as usize != reads.len() {
                return Err(BogError::parse(
                    &fname,
                    lnum + 1,
                    format!("read ids must be dense, expect {} got {}", reads.len(), rid),
                ));
            }
            let mate = match v[4] {
                "-" => None,
                _ => Some(field(4)?),
            };
            reads.push(ReadInfo::new(field(2)?, field(3)?, mate));
        }

        // a mate link has to be symmetric or the mate checker double counts
        for (rid, r) in reads.iter().enumerate() {
            if let Some(m) = r.mate {
                let back = reads.get(m as usize).and_then(|mr| mr.mate);
                if back != Some(rid as u32) {
                    return Err(BogError::parse(
                        &fname,
                        0,
                        format!("read {} names mate {} which does not point back", rid, m),
                    ));
                }
            }
        }
        log::info!("read catalog: {} reads loaded from {}", reads.len(), fname);
        Ok(ReadCatalog { reads })
    }

    #[inline]
    pub fn num_reads(&self) -> usize {
        self.reads.len()
    }

    #[inline]
    pub fn length(&self, rid: u32) -> u32 {
        self.reads[rid as usize].len
    }

    #[inline]
    pub fn library_id(&self, rid: u32) -> u32 {
        self.reads[rid as usize].lib
    }

    #[inline]
    pub fn mate_id(&self, rid: u32) -> Option<u32> {
        self.reads[rid as usize].mate
    }

    #[inline]
    pub fn is_deleted(&self, rid: u32) -> bool {
        self.reads[rid as usize].len == 0
    }

    pub fn total_bases(&self) -> u64 {
        self.reads.iter().map(|r| r.len as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_catalog_with_mates() {
        let path = std::env::temp_dir().join(format!("bog_catalog_{}.txt", std::process::id()));
        {
            let mut f = File::create(&path).unwrap();
            writeln!(f, "# rid len lib mate").unwrap();
            writeln!(f, "R 0 1000 1 1").unwrap();
            writeln!(f, "R 1 900 1 0").unwrap();
            writeln!(f, "R 2 0 2 -").unwrap();
        }
        let cat = ReadCatalog::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(cat.num_reads(), 3);
        assert_eq!(cat.length(1), 900);
        assert_eq!(cat.mate_id(0), Some(1));
        assert_eq!(cat.mate_id(2), None);
        assert!(cat.is_deleted(2));
        assert_eq!(cat.total_bases(), 1900);
    }

    #[test]
    fn one_sided_mate_is_a_parse_error() {
        let path = std::env::temp_dir().join(format!("bog_catalog_bad_{}.txt", std::process::id()));
        {
            let mut f = File::create(&path).unwrap();
            writeln!(f, "R 0 1000 1 1").unwrap();
            writeln!(f, "R 1 900 1 -").unwrap();
        }
        let res = ReadCatalog::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(res, Err(BogError::Parse { .. })));
    }
}
