use std::io::{self, Write};

use super::render::RenderCommand;

const RULE_WIDTH: usize = 60;

pub fn draw(out: &mut impl Write, cmds: &[RenderCommand]) -> io::Result<()> {
    for cmd in cmds {
        match cmd {
            RenderCommand::Heading(text) => {
                writeln!(out, "{text}")?;
                writeln!(out, "{}", "=".repeat(text.chars().count().min(RULE_WIDTH)))?;
            }
            RenderCommand::Section(text) => {
                writeln!(out, "{text}")?;
                writeln!(out, "{}", "-".repeat(text.chars().count().min(RULE_WIDTH)))?;
            }
            RenderCommand::Field { label, value } => writeln!(out, "  {label:<16} {value}")?,
            RenderCommand::Bullet(text) => writeln!(out, "  * {text}")?,
            RenderCommand::Text(text) => writeln!(out, "  {text}")?,
            RenderCommand::Progress(text) => writeln!(out, "... {text}")?,
            RenderCommand::ErrorPanel {
                title,
                detail,
                can_retry,
            } => {
                writeln!(out, "{}", "!".repeat(RULE_WIDTH))?;
                writeln!(out, "! {title}")?;
                writeln!(out, "! {detail}")?;
                if *can_retry {
                    writeln!(out, "! Enter r to retry, anything else to quit.")?;
                }
                writeln!(out, "{}", "!".repeat(RULE_WIDTH))?;
            }
            RenderCommand::Blank => writeln!(out)?,
        }
    }
    out.flush()
}
