use clap::Args;
use visitor_app::crypto::CodecKey;

#[derive(Debug, Args)]
pub(crate) struct GenerateKeyArgs {}

pub(crate) fn run(_args: &GenerateKeyArgs) -> Result<(), String> {
    let key = CodecKey::generate();

    println!("VISITOR_ENCRYPTION_KEY={}", key.to_hex());
    println!("store this key now; data encrypted under it cannot be read without it");

    Ok(())
}
