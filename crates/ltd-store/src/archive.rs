use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::Path;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Unpacks a tar archive, gzipped or not, into `dest`.
pub fn extract_archive(archive: &Path, dest: &Path) -> io::Result<()> {
    fs::create_dir_all(dest)?;

    let reader = BufReader::new(File::open(archive)?);
    if is_gzip(archive)? {
        tar::Archive::new(flate2::read::GzDecoder::new(reader)).unpack(dest)
    } else {
        tar::Archive::new(reader).unpack(dest)
    }
}

fn is_gzip(archive: &Path) -> io::Result<bool> {
    let mut magic = [0u8; 2];
    match File::open(archive)?.read_exact(&mut magic) {
        Ok(()) => Ok(magic == GZIP_MAGIC),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
        Err(e) => Err(e),
    }
}
