use std::fmt::{self, Write};

use crate::{
    config::{ClinicConfig, GlossaryEntry, ReportConfig},
    error::Result,
    member::Member,
    report::formatters::{format_yes_no, pad_row, screening_cells},
    screening::types::{labels, ResultSet},
};

const RULE_WIDTH: usize = 72;

/// Static material that accompanies every report
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub report: &'a ReportConfig,
    pub clinic: &'a ClinicConfig,
    pub glossary: &'a [GlossaryEntry],
}

/// Render the member's report as plain text
///
/// Sections: title, greeting, member block, optional health priority score,
/// reward banner, priority table, clinic contact, glossary, footer.
pub fn render_report(member: &Member, result: &ResultSet, ctx: &ReportContext<'_>) -> Result<String> {
    let mut out = String::new();
    write_report(&mut out, member, result, ctx)?;
    Ok(out)
}

fn write_report(
    out: &mut impl Write,
    member: &Member,
    result: &ResultSet,
    ctx: &ReportContext<'_>,
) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out, "{}", ctx.report.title)?;
    writeln!(out, "{}", rule)?;
    writeln!(out)?;
    writeln!(out, "Dear {},", member.name)?;
    writeln!(out)?;
    writeln!(
        out,
        "This personalized report outlines your most important recommended health\n\
         screenings based on your demographic profile."
    )?;
    writeln!(out)?;

    writeln!(out, "Member:    {}", member.name)?;
    writeln!(out, "Age:       {}", member.age)?;
    writeln!(out, "Gender:    {}", member.gender)?;
    writeln!(out, "Diabetic:  {}", format_yes_no(member.diabetic))?;
    writeln!(out)?;

    if let Some(score) = ctx.report.health_priority_score {
        writeln!(out, "Health Priority Score: {}/100", score)?;
        writeln!(out)?;
    }

    writeln!(out, "*** {} ***", ctx.report.reward_banner)?;
    writeln!(out)?;

    writeln!(out, "Top {} Screenings:", result.priority.len())?;
    if result.priority.is_empty() {
        writeln!(out, "  No eligible screenings")?;
    } else {
        write_priority_table(out, result)?;
    }
    writeln!(out)?;

    let clinic = ctx.clinic;
    writeln!(out, "Nearest Medical Facility:")?;
    writeln!(out, "  {}", clinic.name)?;
    writeln!(out, "  {}", clinic.address)?;
    writeln!(out, "  Tel: {}", clinic.phone)?;
    writeln!(out, "  Email: {}", clinic.email)?;
    writeln!(out, "  Book your screenings: {}", clinic.booking_link)?;
    writeln!(out)?;

    if !ctx.glossary.is_empty() {
        writeln!(out, "Glossary:")?;
        for entry in ctx.glossary {
            writeln!(out, "  {}: {}", entry.term, entry.description)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", rule)?;
    writeln!(out, "{}", ctx.report.footer)
}

fn write_priority_table(out: &mut impl Write, result: &ResultSet) -> fmt::Result {
    let header = [
        labels::SCREENING,
        labels::IMPORTANCE,
        labels::LAST_DONE,
        labels::NEXT_AVAILABLE,
    ];
    let rows: Vec<[String; 4]> = result.priority.iter().map(screening_cells).collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    writeln!(out, "  {}", pad_row(&header, &widths))?;
    let total: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    writeln!(out, "  {}", "-".repeat(total))?;
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        writeln!(out, "  {}", pad_row(&cells, &widths))?;
    }
    Ok(())
}
