//! Placeholder substitution.

use divvy_cli::settings::Settings;
use divvy_cli::templating::{TemplateRenderer, UnresolvedPlaceholders};

#[test]
fn test_unresolved_placeholders_are_kept_and_reported() {
    let variables: Settings = [("foo", "x")].into_iter().collect();
    let outcome = TemplateRenderer::new().render("{FOO}-{BAR}", &variables).unwrap();

    assert_eq!(outcome.content, "x-{BAR}");
    assert_eq!(
        outcome.unresolved,
        Some(UnresolvedPlaceholders {
            count: 1,
            names: vec!["BAR".to_string()],
        })
    );
}

#[test]
fn test_rendering_twice_is_identical() {
    let variables: Settings =
        [("jobname", "align"), ("mem", "16G"), ("code", "bowtie2 -x {INDEX}")].into_iter().collect();
    let template = "#SBATCH --job-name={JOBNAME}\n#SBATCH --mem={MEM}\n{CODE}\n";
    let renderer = TemplateRenderer::new();

    let first = renderer.render(template, &variables).unwrap();
    let second = renderer.render(template, &variables).unwrap();

    assert_eq!(first.content.as_bytes(), second.content.as_bytes());
    assert_eq!(first.content, "#SBATCH --job-name=align\n#SBATCH --mem=16G\nbowtie2 -x {INDEX}\n");
    assert!(first.unresolved.is_none());
}
