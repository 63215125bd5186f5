use colored::Colorize;
use futures_util::TryStreamExt;
use nimbus_cloud_aws::{Ec2, Instance};

pub async fn handle(ec2: &Ec2, running: bool) -> anyhow::Result<()> {
    println!("{}", format!("Listing instances in {}...", ec2.region()).blue());

    println!();
    println!(
        "{}",
        format!(
            "{:<20} {:<24} {:<12} {:<10} {:<16} {:<16} {:<16}",
            "ID", "NAME", "TYPE", "STATE", "ZONE", "PRIVATE IP", "PUBLIC IP"
        )
        .bold()
    );
    println!("{}", "─".repeat(120).dimmed());

    let instances = ec2.instances(running);
    futures_util::pin_mut!(instances);

    let mut count = 0;
    while let Some(instance) = instances.try_next().await? {
        print_row(&instance);
        count += 1;
    }

    if count == 0 {
        println!("{}", "No instances".dimmed());
    }

    Ok(())
}

fn print_row(instance: &Instance) {
    let primary = instance.networks().first();
    let private_ip = primary.map(|n| n.private.ip.as_str()).unwrap_or("-");
    let public_ip = primary
        .and_then(|n| n.public.as_ref())
        .map(|p| p.ip.as_str())
        .unwrap_or("-");

    let state = if instance.is_running() {
        instance.state().green()
    } else {
        instance.state().yellow()
    };

    println!(
        "{:<20} {:<24} {:<12} {:<10} {:<16} {:<16} {:<16}",
        instance.id().cyan(),
        instance.name().unwrap_or("-"),
        instance.instance_type(),
        state,
        instance.availability_zone(),
        private_ip,
        public_ip
    );
}
