use std::env;
use std::path::Path;

use anyhow::{bail, Context, Result};
use lux_core::{Bitmap, PixelFormat, TextureCache};

/// Environment variable naming the directory `prepare` resolves images in.
const RESOURCE_DIR_VAR: &str = "LUX_RESOURCE_DIR";

const USAGE: &str = "\
Usage:
  lux info <image>
  lux flip <in> <out>
  lux rotate <in> <out> [quarter-turns]
  lux convert <in> <out> <gray|gray-alpha|rgb|rgba>
  lux blit <dest> <src> <out> <dest-col> <dest-row>
  lux prepare <image>...";

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        println!("{USAGE}");
        return Ok(());
    };

    match (command.as_str(), rest) {
        ("info", [path]) => info(path),
        ("flip", [input, output]) => flip(input, output),
        ("rotate", [input, output]) => rotate(input, output, 1),
        ("rotate", [input, output, turns]) => {
            let turns = turns
                .parse()
                .with_context(|| format!("Invalid quarter-turn count '{turns}'"))?;
            rotate(input, output, turns)
        }
        ("convert", [input, output, format]) => {
            let format: PixelFormat = format.parse()?;
            convert(input, output, format)
        }
        ("blit", [dest, src, output, col, row]) => {
            let col = col.parse().with_context(|| format!("Invalid column '{col}'"))?;
            let row = row.parse().with_context(|| format!("Invalid row '{row}'"))?;
            blit(dest, src, output, col, row)
        }
        ("prepare", paths) if !paths.is_empty() => prepare(paths),
        _ => bail!("Unrecognized arguments\n\n{USAGE}"),
    }
}

fn load(path: &str) -> Result<Bitmap> {
    Bitmap::from_file(path).with_context(|| format!("Could not load {path}"))
}

fn save(bitmap: &Bitmap, path: &str) -> Result<()> {
    bitmap
        .save(path)
        .with_context(|| format!("Could not write {path}"))?;
    log::info!(
        "Wrote {} ({}x{}, {})",
        path,
        bitmap.width(),
        bitmap.height(),
        bitmap.format()
    );
    Ok(())
}

fn info(path: &str) -> Result<()> {
    let bitmap = load(path)?;
    println!("{}", path);
    println!("  size:     {}x{}", bitmap.width(), bitmap.height());
    println!("  format:   {} ({} channels)", bitmap.format(), bitmap.format().channels());
    println!("  stride:   {} bytes", bitmap.row_stride());
    println!("  bytes:    {}", bitmap.pixels().len());
    Ok(())
}

fn flip(input: &str, output: &str) -> Result<()> {
    let mut bitmap = load(input)?;
    bitmap.flip_vertically();
    save(&bitmap, output)
}

fn rotate(input: &str, output: &str, turns: u32) -> Result<()> {
    let mut bitmap = load(input)?;
    for _ in 0..turns % 4 {
        bitmap.rotate_90_ccw();
    }
    save(&bitmap, output)
}

fn convert(input: &str, output: &str, format: PixelFormat) -> Result<()> {
    let bitmap = load(input)?;
    let converted = bitmap
        .converted(format)
        .with_context(|| format!("Could not convert {input} to {format}"))?;
    save(&converted, output)
}

fn blit(dest: &str, src: &str, output: &str, col: u32, row: u32) -> Result<()> {
    let mut canvas = load(dest)?;
    let source = load(src)?;
    canvas
        .copy_rect_from(&source, 0, 0, col, row, 0, 0)
        .with_context(|| format!("Could not place {src} at ({col}, {row}) in {dest}"))?;
    save(&canvas, output)
}

fn prepare(paths: &[String]) -> Result<()> {
    let mut cache = match env::var_os(RESOURCE_DIR_VAR) {
        Some(dir) => {
            log::info!("Resolving textures in {}", Path::new(&dir).display());
            TextureCache::with_base_dir(dir)
        }
        None => TextureCache::new(),
    };

    for path in paths {
        let texture = cache
            .load(path)
            .with_context(|| format!("Could not prepare texture {path}"))?;
        println!(
            "{}: {}x{} {} ({} bytes, {:?})",
            path,
            texture.original_width(),
            texture.original_height(),
            texture.format(),
            texture.size_bytes(),
            texture.params
        );
    }

    log::info!(
        "Prepared {} textures, {:.1} KB total",
        cache.len(),
        cache.total_size_bytes() as f32 / 1024.0
    );
    Ok(())
}
