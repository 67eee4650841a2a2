use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

use svclust_core::models::Call;

use crate::assembly::CallSet;

pub trait BedWrite {
    ///
    /// Write data to disk as bed file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_bed<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()>;

    ///
    /// Write data to disk as bed.gz file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    fn write_bed_gz<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()>;
}

/// One BED line: `chr  start  end  type`. Point calls get a one-base interval.
pub fn bed_line(call: &Call) -> String {
    let end = if call.is_point() {
        call.start + 1
    } else {
        call.end
    };
    format!(
        "{}\t{}\t{}\t{}",
        call.chr,
        call.start,
        end,
        call.variant_type().label()
    )
}

impl BedWrite for CallSet {
    fn write_bed<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = BufWriter::new(File::create(path)?);

        for call in self.iter() {
            writeln!(file, "{}", bed_line(call))?;
        }
        file.flush()
    }

    fn write_bed_gz<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::best());

        for call in self.iter() {
            writeln!(encoder, "{}", bed_line(call))?;
        }

        encoder.finish()?;
        Ok(())
    }
}
