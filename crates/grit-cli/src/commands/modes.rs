//! Distortion mode listing.

use grit_shaper::DistortionMode;

pub fn run() -> anyhow::Result<()> {
    println!("Distortion Modes");
    println!("================");
    println!();
    println!("  {:5}  {:12}  {}", "Index", "Id", "Name");
    println!("  {:5}  {:12}  {}", "-----", "--", "----");

    for mode in DistortionMode::ALL {
        let marker = if mode == DistortionMode::default() {
            " (default)"
        } else {
            ""
        };
        println!("  {:5}  {:12}  {}{}", mode.index(), mode.id(), mode.name(), marker);
    }

    println!();
    println!("Select with --mode by id, name or index, e.g.:");
    println!("  grit process input.wav output.wav --mode saturate --drive 12");
    Ok(())
}
