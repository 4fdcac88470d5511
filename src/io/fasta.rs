// src/io/fasta.rs
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use tracing::info;

use crate::error::{AssemblyError, Result};
use crate::graph::contig::Contig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub header: String,
    pub sequence: String,
}

pub enum FastaWriter {
    Plain(BufWriter<File>),
    Compressed(BufWriter<GzEncoder<File>>),
}

fn is_gzipped(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "gz")
}

/// Open a FASTA file for reading, handles gzipped files automatically
pub fn open_fasta(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).map_err(|e| AssemblyError::io(path, e))?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Parse FASTA records. Any line containing `>` starts a new record;
/// sequence lines are concatenated and blank lines skipped. Records with
/// no sequence are dropped.
pub fn parse_fasta<R: BufRead>(reader: R) -> io::Result<Vec<FastaRecord>> {
    let mut records = Vec::new();
    let mut header = String::new();
    let mut sequence = String::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim_end();

        if line.contains('>') {
            if !sequence.is_empty() {
                records.push(FastaRecord {
                    header: std::mem::take(&mut header),
                    sequence: std::mem::take(&mut sequence),
                });
            }
            header = line.trim_start_matches('>').to_string();
        } else if !line.is_empty() {
            sequence.push_str(line);
        }
    }

    if !sequence.is_empty() {
        records.push(FastaRecord { header, sequence });
    }

    Ok(records)
}

pub fn read_fasta(path: &Path) -> Result<Vec<FastaRecord>> {
    let reader = open_fasta(path)?;
    let records = parse_fasta(reader).map_err(|e| AssemblyError::io(path, e))?;
    info!("Loaded {} Genes", records.len());
    Ok(records)
}

impl FastaWriter {
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        if is_gzipped(path) {
            let encoder = GzEncoder::new(file, Compression::default());
            Ok(FastaWriter::Compressed(BufWriter::new(encoder)))
        } else {
            Ok(FastaWriter::Plain(BufWriter::new(file)))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            FastaWriter::Plain(writer) => writer as &mut dyn Write,
            FastaWriter::Compressed(writer) => writer as &mut dyn Write,
        }
    }

    pub fn write_record(&mut self, header: &str, sequence: &str) -> io::Result<()> {
        let writer = self.writer();
        writeln!(writer, ">{}", header)?;
        writeln!(writer, "{}", sequence)
    }

    /// Contig headers carry the index and the sequence length: `>3 125`
    pub fn write_contig(&mut self, contig: &Contig, index: usize) -> io::Result<()> {
        self.write_record(&format!("{} {}", index, contig.len()), &contig.sequence)
    }

    /// Write the closing blank lines and flush everything to disk.
    pub fn finish(self) -> io::Result<()> {
        match self {
            FastaWriter::Plain(mut writer) => {
                writer.write_all(b"\n\n")?;
                writer.flush()
            }
            FastaWriter::Compressed(mut writer) => {
                writer.write_all(b"\n\n")?;
                let encoder = writer.into_inner().map_err(|e| e.into_error())?;
                encoder.finish()?;
                Ok(())
            }
        }
    }
}

/// Write contigs to `path` in index order
pub fn write_contigs(path: &Path, contigs: &[Contig]) -> Result<()> {
    let mut writer = FastaWriter::new(path).map_err(|e| AssemblyError::io(path, e))?;
    for (index, contig) in contigs.iter().enumerate() {
        writer
            .write_contig(contig, index)
            .map_err(|e| AssemblyError::io(path, e))?;
    }
    writer.finish().map_err(|e| AssemblyError::io(path, e))
}
