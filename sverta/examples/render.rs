//! Render one glyph from a font file to a PGM image.
//!
//! Usage: render FONT_FILE CHAR [HEIGHT_PX]

use sverta::raw::FontRef;

fn main() {
    let mut args = std::env::args().skip(1);
    let (Some(path), Some(ch)) = (args.next(), args.next()) else {
        eprintln!("usage: render FONT_FILE CHAR [HEIGHT_PX]");
        std::process::exit(1);
    };
    let ch = ch.chars().next().expect("empty CHAR argument");
    let height: u32 = args
        .next()
        .map(|raw| raw.parse().expect("HEIGHT_PX must be an integer"))
        .unwrap_or(64);

    let bytes = std::fs::read(&path).expect("failed to read font file");
    let font = match FontRef::new(&bytes) {
        Ok(font) => font,
        Err(error) => {
            eprintln!("failed to load {path}: {error}");
            std::process::exit(1);
        }
    };

    println!(
        "{} glyphs, {} units per em, '{}' -> glyph {}",
        font.num_glyphs(),
        font.units_per_em(),
        ch,
        font.char_index(ch),
    );
    let outline = font.outline_for(ch);
    println!("outline: {} segments, d=\"{}\"", outline.segments.len(), outline.svg_path_data());

    let mask = sverta::rasterize_glyph(&font, ch, height);
    let out = format!("glyph-{}.pgm", ch as u32);
    std::fs::write(&out, mask.to_pgm()).expect("failed to write output");
    println!("wrote {}x{} mask to {out}", mask.width, mask.height);
}
