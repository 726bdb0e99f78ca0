use anyhow::Result;
use cf_hundred::config::Settings;
use cf_hundred::roster;

pub fn run(settings: &Settings) -> Result<()> {
    let path = &settings.roster;

    if !roster::write_default(path)? {
        println!("Roster '{}' already exists; leaving it alone.", path.display());
        return Ok(());
    }

    println!(
        "Created roster '{}' with {} example handles.",
        path.display(),
        roster::DEFAULT_HANDLES.len()
    );
    println!();
    println!("  edit {}", path.display());
    println!("  cf-hundred track");

    Ok(())
}
