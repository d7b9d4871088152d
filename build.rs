use image::GenericImageView;
use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Bitmap assets are traced on a 64x64 canvas
const ASSET_WIDTH: u32 = 64;
const ASSET_HEIGHT: u32 = 64;

/// Pixels at or above this brightness light up the beam
const THRESHOLD: u8 = 128;

/// Convert PNG image to a packed 1-bit bitmap at build time
///
/// Rows are stored top to bottom, eight pixels per byte, leftmost pixel in
/// bit 7. A set bit is a pixel the beam should visit.
fn convert_image_to_binary(
    input_path: &str,
    output_path: &str,
    target_width: u32,
    target_height: u32,
    threshold: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={}", input_path);

    let bytes_per_row = target_width.div_ceil(8);
    let total_bytes = (bytes_per_row * target_height) as usize;
    let mut buffer = vec![0u8; total_bytes];

    // Check if input file exists
    if !Path::new(input_path).exists() {
        println!(
            "cargo:warning=Image file '{}' not found, using a blank bitmap",
            input_path
        );
        // Blank bitmap of the right size so the firmware still links
        let mut file = File::create(output_path)?;
        file.write_all(&buffer)?;
        return Ok(());
    }

    // Load the image
    let img = image::open(input_path)?;
    let (orig_width, orig_height) = img.dimensions();

    // Calculate aspect-ratio-preserving dimensions
    let orig_ratio = orig_width as f32 / orig_height as f32;
    let target_ratio = target_width as f32 / target_height as f32;

    let (new_width, new_height) = if orig_ratio > target_ratio {
        // Image is wider than target - fit to width
        (target_width, (target_width as f32 / orig_ratio) as u32)
    } else {
        // Image is taller than target - fit to height
        ((target_height as f32 * orig_ratio) as u32, target_height)
    };

    // Assets drawn at native size must not be resampled, it smears single pixels
    let resized = if (orig_width, orig_height) == (new_width, new_height) {
        img
    } else {
        println!(
            "cargo:warning=Resizing {} from {}x{} to {}x{}",
            input_path, orig_width, orig_height, new_width, new_height
        );
        img.resize(new_width, new_height, image::imageops::FilterType::Lanczos3)
    };

    // Convert to grayscale
    let gray = resized.to_luma8();

    // Calculate centering offsets
    let offset_x = (target_width - new_width) / 2;
    let offset_y = (target_height - new_height) / 2;

    // Background stays dark, the image is centered
    for y in 0..target_height {
        for x in 0..target_width {
            let img_x = x.checked_sub(offset_x);
            let img_y = y.checked_sub(offset_y);

            let brightness = match (img_x, img_y) {
                (Some(ix), Some(iy)) if ix < new_width && iy < new_height => {
                    gray.get_pixel(ix, iy)[0]
                }
                _ => 0,
            };

            if brightness >= threshold {
                let byte_index = (y * bytes_per_row + x / 8) as usize;
                let bit_index = 7 - (x % 8);
                buffer[byte_index] |= 1 << bit_index;
            }
        }
    }

    // Write binary data to file
    let mut file = File::create(output_path)?;
    file.write_all(&buffer)?;
    Ok(())
}

fn main() {
    #[cfg(feature = "esp32")]
    embuild::espidf::sysenv::output();

    // Get output directory
    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => dir,
        Err(e) => {
            println!("cargo:warning=OUT_DIR is not set: {}", e);
            return;
        }
    };

    for name in ["doge", "pepe"] {
        let input = format!("assets/{}.png", name);
        let output = format!("{}/{}.bin", out_dir, name);

        if let Err(e) = convert_image_to_binary(
            &input,
            &output,
            ASSET_WIDTH,
            ASSET_HEIGHT,
            THRESHOLD,
        ) {
            println!("cargo:warning=Failed to convert {}: {}", input, e);
            let blank = vec![0u8; (ASSET_WIDTH / 8 * ASSET_HEIGHT) as usize];
            if let Err(e) = std::fs::write(&output, blank) {
                println!("cargo:warning=Failed to write {}: {}", output, e);
            }
        }
    }

    println!("cargo:rerun-if-changed=assets");
}
