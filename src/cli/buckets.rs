use crate::cli::InputArgs;
use crate::error::Result;
use crate::pipeline::bucket;
use crate::settings::load_settings;

pub fn run(input: &str, input_args: &InputArgs) -> Result<()> {
    let settings = load_settings();
    let read = input_args.read_options(&settings)?;
    let bytes = std::fs::read(input)?;
    let map = bucket(&bytes, &read, input_args.date_column(&settings))?;
    println!("{}", serde_json::to_string_pretty(&map)?);
    Ok(())
}
