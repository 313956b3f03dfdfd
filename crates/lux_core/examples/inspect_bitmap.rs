//! Example: Load an image and print what the texture uploader would see.
//!
//! Run with: cargo run --example inspect_bitmap -- assets/wooden-crate.jpg

use std::env;

use lux_core::{TextureImage, TextureParams};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_bitmap <path-to-image>");
        println!("\nExamples:");
        println!("  cargo run --example inspect_bitmap -- assets/wooden-crate.jpg");
        println!("  cargo run --example inspect_bitmap -- assets/grass.png");
        return;
    }

    let path = &args[1];
    println!("Loading image: {}", path);

    match TextureImage::load(path, TextureParams::default()) {
        Ok(texture) => {
            println!("\n=== Texture: {} ===", texture.path);
            println!(
                "Size: {}x{}",
                texture.original_width(),
                texture.original_height()
            );
            println!("Format: {} ({} channels)", texture.format(), texture.format().channels());
            println!("Bytes: {}", texture.size_bytes());
            println!("Params: {:?}", texture.params);

            // Upload order is bottom row first
            let bitmap = texture.bitmap();
            if let Ok(first) = bitmap.pixel(0, 0) {
                println!("First uploaded pixel (bottom-left of image): {:?}", first);
            }
        }
        Err(e) => {
            eprintln!("Error loading image: {}", e);
            std::process::exit(1);
        }
    }
}
