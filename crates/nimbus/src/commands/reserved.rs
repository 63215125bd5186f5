use colored::Colorize;
use nimbus_cloud_aws::Ec2;

pub async fn handle(ec2: &Ec2, active: bool) -> anyhow::Result<()> {
    println!(
        "{}",
        format!("Listing reserved instances in {}...", ec2.region()).blue()
    );

    let reserved = ec2.reserved_instances(active).await?;

    println!();
    if reserved.is_empty() {
        println!("{}", "No reserved instances".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "{:<38} {:<12} {:>5} {:<20} {:<10} {:<12} {:>10}",
            "ID", "TYPE", "COUNT", "DESCRIPTION", "STATE", "EXPIRES", "REMAINING"
        )
        .bold()
    );
    println!("{}", "─".repeat(115).dimmed());

    for ri in &reserved {
        let remaining = ri.remaining_time();
        let remaining_text = format!("{}d", remaining.num_days());
        let remaining_colored = if remaining.num_seconds() < 0 {
            remaining_text.red()
        } else if remaining.num_days() < 30 {
            remaining_text.yellow()
        } else {
            remaining_text.green()
        };

        println!(
            "{:<38} {:<12} {:>5} {:<20} {:<10} {:<12} {:>10}",
            ri.id().cyan(),
            ri.instance_type(),
            ri.count(),
            ri.description(),
            ri.state(),
            ri.expire_time().format("%Y-%m-%d"),
            remaining_colored
        );
    }

    Ok(())
}
