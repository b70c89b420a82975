use crate::core::zodiac::zodiac_for_year;

pub fn run(year: i32) -> anyhow::Result<()> {
    println!("{year}: {}", zodiac_for_year(year));
    Ok(())
}
