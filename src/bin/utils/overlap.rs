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
// overlap records and the sources that stream them into the graph builder
//

use super::error::BogError;
use flate2::bufread::MultiGzDecoder;
use glob::glob;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const ERRBITS: u32 = 12;
pub const MAX_ERATE_Q: u64 = (1 << ERRBITS) - 1;

/// error rate fraction to the 12 bit quality value used for scoring
#[inline]
pub fn encode_quality(erate: f64) -> u64 {
    let q = (erate * 1000.0).round();
    if q <= 0.0 {
        0
    } else if q as u64 > MAX_ERATE_Q {
        MAX_ERATE_Q
    } else {
        q as u64
    }
}

#[inline]
pub fn decode_quality(q: u64) -> f64 {
    q as f64 / 1000.0
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Overlap {
    pub a_id: u32,
    pub b_id: u32,
    // offset of B's begin relative to A's begin, and B's end relative to A's end
    pub a_hang: i32,
    pub b_hang: i32,
    pub flipped: bool,
    pub orig_erate: f64,
    pub corr_erate: f64,
}

impl Overlap {
    pub fn new(a_id: u32, b_id: u32, a_hang: i32, b_hang: i32, flipped: bool, erate: f64) -> Self {
        Overlap {
            a_id,
            b_id,
            a_hang,
            b_hang,
            flipped,
            orig_erate: erate,
            corr_erate: erate,
        }
    }

    pub fn build_from(v: &[&str]) -> Result<Self, String> {
        // O <a> <b> <N|I> <a_hang> <b_hang> <orig_erate> <corr_erate>
        if v.len() < 8 {
            return Err(format!("expect 8 fields in an overlap record, got {}", v.len()));
        }
        let flipped = match v[3] {
            "N" | "n" | "0" => false,
            "I" | "i" | "1" => true,
            o => return Err(format!("unknown orientation `{}`", o)),
        };
        let pu32 = |i: usize| v[i].parse::<u32>().map_err(|e| format!("field {}: {}", i, e));
        let pi32 = |i: usize| v[i].parse::<i32>().map_err(|e| format!("field {}: {}", i, e));
        let pf64 = |i: usize| v[i].parse::<f64>().map_err(|e| format!("field {}: {}", i, e));
        Ok(Overlap {
            a_id: pu32(1)?,
            b_id: pu32(2)?,
            flipped,
            a_hang: pi32(4)?,
            b_hang: pi32(5)?,
            orig_erate: pf64(6)?,
            corr_erate: pf64(7)?,
        })
    }

    pub fn format(&self) -> String {
        format!(
            "O {} {} {} {} {} {:.4} {:.4}",
            self.a_id,
            self.b_id,
            if self.flipped { "I" } else { "N" },
            self.a_hang,
            self.b_hang,
            self.orig_erate,
            self.corr_erate
        )
    }

    /// the same overlap seen from the B read
    pub fn swapped(&self) -> Overlap {
        let (a_hang, b_hang) = if self.flipped {
            (self.b_hang, self.a_hang)
        } else {
            (-self.a_hang, -self.b_hang)
        };
        Overlap {
            a_id: self.b_id,
            b_id: self.a_id,
            a_hang,
            b_hang,
            ..*self
        }
    }

    #[inline]
    pub fn is_containment(&self) -> bool {
        (self.a_hang >= 0 && self.b_hang <= 0) || (self.a_hang <= 0 && self.b_hang >= 0)
    }

    #[inline]
    pub fn is_dovetail(&self) -> bool {
        !self.is_containment()
    }

    #[inline]
    pub fn a_contains_b(&self) -> bool {
        self.a_hang >= 0 && self.b_hang <= 0
    }

    #[inline]
    pub fn orig_q(&self) -> u64 {
        encode_quality(self.orig_erate)
    }

    #[inline]
    pub fn corr_q(&self) -> u64 {
        encode_quality(self.corr_erate)
    }
}

/// Anything that can replay the whole overlap stream, once per call.
pub trait OverlapSource {
    fn for_each_overlap(&mut self, f: &mut dyn FnMut(&Overlap)) -> Result<usize, BogError>;
}

impl OverlapSource for Vec<Overlap> {
    fn for_each_overlap(&mut self, f: &mut dyn FnMut(&Overlap)) -> Result<usize, BogError> {
        self.iter().for_each(|o| f(o));
        Ok(self.len())
    }
}

/// Overlap records from the files matching a glob pattern, plain text or gzipped.
pub struct OverlapFiles {
    files: Vec<PathBuf>,
    symmetrize: bool,
}

impl OverlapFiles {
    pub fn new(pattern: &str, symmetrize: bool) -> Result<Self, BogError> {
        let mut files = Vec::<PathBuf>::new();
        let entries = glob(pattern)
            .map_err(|e| BogError::Config(format!("bad overlap file pattern {}: {}", pattern, e)))?;
        for entry in entries {
            match entry {
                Ok(path) => files.push(path),
                Err(e) => log::warn!("skip unreadable overlap path: {:?}", e),
            }
        }
        files.sort();
        log::info!("overlap files: {} match {}", files.len(), pattern);
        Ok(OverlapFiles { files, symmetrize })
    }

    pub fn num_files(&self) -> usize {
        self.files.len()
    }

    fn open(path: &Path) -> Result<Box<dyn BufRead>, BogError> {
        let reader = BufReader::new(File::open(path)?);
        let is_gz = path.extension().map(|e| e == "gz").unwrap_or(false);
        if is_gz {
            Ok(Box::new(BufReader::new(MultiGzDecoder::new(reader))))
        } else {
            Ok(Box::new(reader))
        }
    }
}

impl OverlapSource for OverlapFiles {
    fn for_each_overlap(&mut self, f: &mut dyn FnMut(&Overlap)) -> Result<usize, BogError> {
        let mut count = 0_usize;
        for path in self.files.iter() {
            let fname = path.to_string_lossy().to_string();
            let reader = Self::open(path)?;
            for (lnum, line) in reader.lines().enumerate() {
                let line = line?;
                let v: Vec<&str> = line.split_whitespace().collect();
                if v.is_empty() || v[0] != "O" {
                    continue;
                }
                let ovlp = Overlap::build_from(&v)
                    .map_err(|msg| BogError::parse(&fname, lnum + 1, msg))?;
                f(&ovlp);
                count += 1;
                if self.symmetrize {
                    f(&ovlp.swapped());
                    count += 1;
                }
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    #[test]
    fn containment_sign_test() {
        // B inside A
        assert!(Overlap::new(0, 1, 100, -100, false, 0.01).is_containment());
        // A inside B
        assert!(Overlap::new(0, 1, -100, 100, false, 0.01).is_containment());
        // zero hang on one side still counts as contained
        assert!(Overlap::new(0, 1, 0, -500, false, 0.01).is_containment());
        assert!(Overlap::new(0, 1, 500, 500, false, 0.01).is_dovetail());
        assert!(Overlap::new(0, 1, -500, -500, false, 0.01).is_dovetail());
    }

    #[test]
    fn swap_keeps_the_geometry() {
        let o = Overlap::new(3, 7, 400, 250, false, 0.02);
        let s = o.swapped();
        assert_eq!((s.a_id, s.b_id, s.a_hang, s.b_hang), (7, 3, -400, -250));
        assert_eq!(s.swapped(), o);

        let o = Overlap::new(3, 7, 400, 250, true, 0.02);
        let s = o.swapped();
        assert_eq!((s.a_hang, s.b_hang), (250, 400));
        assert!(s.flipped);
    }

    #[test]
    fn quality_encoding_saturates() {
        assert_eq!(encode_quality(0.015), 15);
        assert_eq!(encode_quality(0.0), 0);
        assert_eq!(encode_quality(10.0), MAX_ERATE_Q);
        assert!((decode_quality(60) - 0.06).abs() < 1e-9);
    }

    #[test]
    fn read_plain_and_gz_overlap_files() {
        let dir = std::env::temp_dir().join(format!("bog_ovlp_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let o1 = Overlap::new(0, 1, 500, 500, false, 0.01);
        let o2 = Overlap::new(1, 2, -300, -200, true, 0.02);
        {
            let mut f = File::create(dir.join("ovlp-01.txt")).unwrap();
            writeln!(f, "{}", o1.format()).unwrap();
            writeln!(f, "# comment").unwrap();
        }
        {
            let f = File::create(dir.join("ovlp-02.txt.gz")).unwrap();
            let mut gz = GzEncoder::new(f, Compression::default());
            writeln!(gz, "{}", o2.format()).unwrap();
            gz.finish().unwrap();
        }
        let pattern = format!("{}/ovlp-*", dir.to_string_lossy());
        let mut src = OverlapFiles::new(&pattern, true).unwrap();
        assert_eq!(src.num_files(), 2);

        let mut seen = Vec::new();
        let n = src.for_each_overlap(&mut |o| seen.push(*o)).unwrap();
        assert_eq!(n, 4);
        assert_eq!(seen[0], o1);
        assert_eq!(seen[1], o1.swapped());
        assert_eq!(seen[2], o2);

        // a second pass replays the same records
        let n2 = src.for_each_overlap(&mut |_| ()).unwrap();
        assert_eq!(n2, 4);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn malformed_overlap_line_is_a_parse_error() {
        let dir = std::env::temp_dir().join(format!("bog_ovlp_bad_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        {
            let mut f = File::create(dir.join("bad.ovl")).unwrap();
            writeln!(f, "O 0 1 X 10 10 0.01 0.01").unwrap();
        }
        let pattern = format!("{}/*.ovl", dir.to_string_lossy());
        let mut src = OverlapFiles::new(&pattern, false).unwrap();
        let res = src.for_each_overlap(&mut |_| ());
        std::fs::remove_dir_all(&dir).unwrap();
        match res {
            Err(BogError::Parse { line, .. }) => assert_eq!(line, 1),
            other => panic!("expect a parse error, got {:?}", other),
        }
    }
}
