use capability_router::{Options, Router};
use serde_json::json;

use crate::args::Command;

pub async fn run(router: &Router, command: Command, as_json: bool) -> anyhow::Result<()> {
    match command {
        Command::Services => list_services(router, as_json)?,
        Command::Providers => list_providers(router, as_json)?,
        Command::Resolve { service } => {
            let provider = router.resolve(&service)?;
            println!("{service} -> {provider}");
        }
        Command::Create {
            service,
            options,
            use_async,
        } => {
            let options: Options = options.into_iter().collect();
            if use_async {
                create_async(router, &service, &options).await?;
            } else {
                create(router, &service, &options)?;
            }
        }
    }
    Ok(())
}

fn list_services(router: &Router, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        let rows: Vec<_> = router
            .registry()
            .services()
            .map(|(service, provider)| {
                json!({
                    "service": service,
                    "provider": provider,
                    "status": router.loader().status(provider).to_string(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    for (service, provider) in router.registry().services() {
        let status = router.loader().status(provider);
        println!("{:<18} {:<10} {status}", service.as_str(), provider.as_str());
    }
    Ok(())
}

fn list_providers(router: &Router, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        let rows: Vec<_> = router
            .registry()
            .providers()
            .map(|entry| {
                json!({
                    "id": entry.id,
                    "services": entry.services,
                    "install_hint": entry.install_hint,
                    "status": router.loader().status(&entry.id).to_string(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    for entry in router.registry().providers() {
        println!(
            "{} ({} services, {})",
            entry.id,
            entry.services.len(),
            router.loader().status(&entry.id)
        );
        println!("  {}", entry.install_hint);
    }
    Ok(())
}

fn create(router: &Router, service: &str, options: &Options) -> anyhow::Result<()> {
    let handle = router.create(service, options)?;
    handle.check()?;
    println!(
        "opened '{}' via '{}': {:?}",
        handle.service_name(),
        handle.provider_id(),
        handle.capability()
    );
    Ok(())
}

async fn create_async(router: &Router, service: &str, options: &Options) -> anyhow::Result<()> {
    let handle = router.create_async(service, options).await?;
    handle.check().await?;
    println!(
        "opened '{}' via '{}' (async): {:?}",
        handle.service_name(),
        handle.provider_id(),
        handle.capability()
    );
    Ok(())
}
