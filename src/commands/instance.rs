// ABOUTME: `instance` command: print the identity derived for the workdir.
// ABOUTME: Needs no container runtime.

use super::context::Context;
use ai_shell::error::Result;
use ai_shell::labels::creation_labels;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize)]
struct InstanceReport<'a> {
    workdir: &'a str,
    instance_id: &'a str,
    container: &'a str,
    volume: &'a str,
    image: &'a str,
    labels: BTreeMap<String, String>,
}

pub fn instance(ctx: &Context) -> Result<()> {
    let (workdir, names) = ctx.derived()?;
    let labels = creation_labels(&names.instance_id, &names.volume);

    if ctx.output.is_json() {
        let report = InstanceReport {
            workdir: workdir.as_str(),
            instance_id: names.instance_id.as_str(),
            container: names.container.as_str(),
            volume: names.volume.as_str(),
            image: &ctx.settings.image,
            labels: labels.into_iter().collect(),
        };
        ctx.output.json(&report)?;
        return Ok(());
    }

    println!("workdir:    {workdir}");
    println!("instance:   {}", names.instance_id);
    println!("container:  {}", names.container);
    println!("volume:     {}", names.volume);
    println!("image:      {}", ctx.settings.image);
    println!("labels:");
    for (key, value) in &labels {
        println!("  {key}={value}");
    }
    Ok(())
}
