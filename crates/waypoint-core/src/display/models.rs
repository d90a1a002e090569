//! Display implementations for domain models.
//!
//! Every model renders as markdown so the same output works in a terminal
//! (through a markdown renderer) and as MCP tool text.

use std::fmt;

use super::datetime::{today, DayDate, LocalDateTime};
use crate::models::{Activity, ActivityCategory, ItineraryDay, Trip, TripStatus, TripSummary};

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn write_money(f: &mut fmt::Formatter<'_>, label: &str, amount: f64) -> fmt::Result {
    writeln!(f, "- **{label}**: {amount:.2}")
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- **Destination**: {}", self.destination.label)?;
        writeln!(
            f,
            "- **Dates**: {} to {} ({} days)",
            DayDate(&self.start_date),
            DayDate(&self.end_date),
            self.duration_days()
        )?;
        writeln!(f, "- **Status**: {}", self.status_on(today()))?;
        if let Some(budget) = self.budget {
            write_money(f, "Budget", budget)?;
        }
        write_money(f, "Planned cost", self.total_activity_cost())?;
        if let Some(cover) = &self.cover_image {
            writeln!(f, "- **Cover image**: {cover}")?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;

        if let Some(desc) = &self.description {
            writeln!(f)?;
            writeln!(f, "{desc}")?;
        }

        if !self.images.is_empty() {
            writeln!(f, "\n## Images")?;
            writeln!(f)?;
            for image in &self.images {
                writeln!(f, "{}. {}", image.order + 1, image.url)?;
            }
        }

        writeln!(f, "\n## Itinerary")?;
        writeln!(f)?;
        for day in &self.days {
            write!(f, "{day}")?;
        }

        Ok(())
    }
}

impl fmt::Display for ItineraryDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {} · {} (day ID: {})",
            self.title,
            DayDate(&self.date),
            self.id
        )?;
        writeln!(f)?;

        if let Some(notes) = &self.notes {
            writeln!(f, "{notes}")?;
            writeln!(f)?;
        }

        if self.activities.is_empty() {
            writeln!(f, "No activities planned.")?;
            writeln!(f)?;
            return Ok(());
        }

        for activity in &self.activities {
            write!(f, "{activity}")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = match (&self.start_time, &self.end_time) {
            (Some(start), Some(end)) => format!("{start}–{end} "),
            (Some(start), None) => format!("{start} "),
            (None, Some(end)) => format!("until {end} "),
            (None, None) => String::new(),
        };

        write!(
            f,
            "{}. {time}**{}** ({}, ID: {})",
            self.position + 1,
            self.title,
            self.category.with_icon(),
            self.id
        )?;
        if let Some(location) = &self.location {
            write!(f, " @ {location}")?;
        }
        if self.cost > 0.0 {
            write!(f, " · {:.2}", self.cost)?;
        }
        writeln!(f)?;

        if let Some(desc) = &self.description {
            writeln!(f, "   {desc}")?;
        }

        Ok(())
    }
}

impl fmt::Display for TripSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.title, self.id)?;
        writeln!(f)?;

        writeln!(f, "- **Destination**: {}", self.destination)?;
        writeln!(
            f,
            "- **Dates**: {} to {}",
            DayDate(&self.start_date),
            DayDate(&self.end_date)
        )?;
        writeln!(f, "- **Status**: {}", self.status_on(today()))?;
        writeln!(
            f,
            "- **Plan**: {} activities over {} days",
            self.activity_count, self.day_count
        )?;
        if let Some(budget) = self.budget {
            write_money(f, "Budget", budget)?;
        }
        if let Some(remaining) = self.remaining_budget() {
            write_money(f, "Remaining", remaining)?;
        }
        writeln!(f)?;

        Ok(())
    }
}
