//! Parameter table listing.

use grit_shaper::PARAMS;

pub fn run() -> anyhow::Result<()> {
    println!("Parameters");
    println!("==========");
    println!();
    println!(
        "  {:3}  {:8}  {:12}  {:>10}  {:>10}  {:>10}  {:5}",
        "Idx", "Name", "Id", "Min", "Max", "Default", "Scale"
    );
    println!(
        "  {:3}  {:8}  {:12}  {:>10}  {:>10}  {:>10}  {:5}",
        "---", "----", "--", "---", "---", "-------", "-----"
    );

    for (index, desc) in PARAMS.iter().enumerate() {
        println!(
            "  {:3}  {:8}  {:12}  {:>10}  {:>10}  {:>10}  {:5}",
            index,
            desc.name,
            desc.string_id,
            desc.display(desc.min).to_string(),
            desc.display(desc.max).to_string(),
            desc.display(desc.default).to_string(),
            desc.scale.label(),
        );
    }
    Ok(())
}
