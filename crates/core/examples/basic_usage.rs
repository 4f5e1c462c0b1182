//! Basic usage example of the markdiff library
//!
//! Run with `RUST_LOG=markdiff_core=debug` to see the engine's log output.

use markdiff_core::{compare, DiffAlgorithm, DiffConfig, DiffEngine, MarkupSource};
use tracing_subscriber::EnvFilter;

const LINE: &str = "----------------------------------------";

fn main() -> markdiff_core::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    println!("=== Markdiff Examples ===\n");

    // Example 1: Simple diff with default configuration
    example_simple_diff()?;

    // Example 2: Keeping the markup of the old fragment
    example_markup_from_before()?;

    // Example 3: Custom configuration
    example_custom_config()?;

    // Example 4: Inspecting statistics
    example_statistics()?;

    Ok(())
}

fn example_simple_diff() -> markdiff_core::Result<()> {
    println!("Example 1: Simple Diff");
    println!("{}", LINE);

    let before = "<p>Hello World! This is a test.</p>";
    let after = "<p>Hello Rust! This is a <em>small</em> test.</p>";

    println!("Before: {}", before);
    println!("After:  {}", after);
    println!("Diff:   {}", compare(before, after)?);
    println!("\n");
    Ok(())
}

fn example_markup_from_before() -> markdiff_core::Result<()> {
    println!("Example 2: Markup From Before");
    println!("{}", LINE);

    let before = "<b>byebye</b> world";
    let after = "<i>hello</i> world";

    let engine = DiffEngine::new(DiffConfig::new().with_markup_from(MarkupSource::Before));

    println!("Before: {}", before);
    println!("After:  {}", after);
    println!("Diff:   {}", engine.compare(before, after)?);
    println!("\n");
    Ok(())
}

fn example_custom_config() -> markdiff_core::Result<()> {
    println!("Example 3: Custom Configuration");
    println!("{}", LINE);

    let before = "The quick brown fox jumps over the lazy dog.";
    let after = "The quick red fox leaps over the lazy dog, again.";

    let config = DiffConfig::new()
        .with_algorithm(DiffAlgorithm::Patience)
        .with_render_deletion(|html| format!(r#"<span class="removed">{html}</span>"#))
        .with_render_insertion(|html| format!(r#"<span class="added">{html}</span>"#));

    let engine = DiffEngine::new(config);

    println!("Before: {}", before);
    println!("After:  {}", after);
    println!("Diff:   {}", engine.compare(before, after)?);
    println!("\n");
    Ok(())
}

fn example_statistics() -> markdiff_core::Result<()> {
    println!("Example 4: Statistics");
    println!("{}", LINE);

    let before = "<ul><li>milk</li><li>eggs</li><li>bread</li></ul>";
    let after = "<ul><li>milk</li><li>butter</li><li>bread</li><li>jam</li></ul>";

    let output = DiffEngine::default().diff(before, after)?;
    let stats = &output.statistics;

    println!("Diff:         {}", output.html);
    println!("Equal:        {}", stats.equal);
    println!("Replacements: {}", stats.replacements);
    println!("Insertions:   {}", stats.insertions);
    println!("Deletions:    {}", stats.deletions);
    println!("Change ratio: {:.1}%", stats.change_ratio() * 100.0);
    println!("\n");
    Ok(())
}
