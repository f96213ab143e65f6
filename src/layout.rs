//! Report layout engine
//!
//! Walks a conversation record and emits the draw-operation sequence the
//! page canvas executes. Section selection, document ordering and forced
//! pagination all live here; vertical-space tracking does not.
//!
//! Document order is: metadata block and consultation on page one, then a
//! forced break into the member-response appendix, then a forced break
//! into the final resolution. `ReportConfig` can swap the last two
//! sections, flow the appendix continuously instead of one model per page,
//! and limit rendering to the first final resolution.

use log::debug;

use crate::conversation::{ConversationRecord, FinalResponse, MemberResponse};
use crate::fonts::FontStyle;
use crate::format::{display_model_name, format_timestamp, strip_markers};
use crate::ops::{Align, DrawOp};
use crate::theme::{self, labels};

// Flow metrics in points (one mm is 2.8346 pt).
const LINE: f64 = 17.0;
const TITLE_LINE: f64 = 28.35;
const HEAD_LINE: f64 = 22.68;
const GAP_SMALL: f64 = 5.67;
const GAP: f64 = 14.17;
const GAP_LARGE: f64 = 28.35;
const TITLE_INDENT: f64 = 5.67;

/// Where the synthesized final resolution sits relative to the appendix of
/// member responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionOrder {
    /// Member appendix first, final resolution last.
    AppendixFirst,
    /// Final resolution first, member appendix last.
    FinalFirst,
}

/// How many final resolutions render when several assistant messages
/// carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalResponsePolicy {
    /// Render a final section per occurrence, in message order.
    All,
    /// Render only the first occurrence.
    FirstOnly,
}

#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub order: SectionOrder,
    pub one_model_per_page: bool,
    pub final_policy: FinalResponsePolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            order: SectionOrder::AppendixFirst,
            one_model_per_page: true,
            final_policy: FinalResponsePolicy::All,
        }
    }
}

pub struct LayoutEngine {
    config: ReportConfig,
}

impl LayoutEngine {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Produce the full drawing plan for one conversation record.
    pub fn plan(&self, record: &ConversationRecord) -> Vec<DrawOp> {
        let mut ops = Vec::new();
        ops.push(DrawOp::AddPage);
        self.metadata(record, &mut ops);
        self.consultation(record, &mut ops);

        let members: Vec<&MemberResponse> = record.member_responses().collect();
        let mut finals: Vec<&FinalResponse> = record.final_responses().collect();
        if self.config.final_policy == FinalResponsePolicy::FirstOnly {
            finals.truncate(1);
        }

        match self.config.order {
            SectionOrder::AppendixFirst => {
                self.member_appendix(&members, &mut ops);
                self.final_section(&finals, &mut ops);
            }
            SectionOrder::FinalFirst => {
                self.final_section(&finals, &mut ops);
                self.member_appendix(&members, &mut ops);
            }
        }

        debug!(
            "planned {} draw operations ({} members, {} finals)",
            ops.len(),
            members.len(),
            finals.len()
        );
        ops
    }

    /// Title, id and formatted date at the top of page one.
    fn metadata(&self, record: &ConversationRecord, ops: &mut Vec<DrawOp>) {
        let title = record.title.as_deref().unwrap_or(labels::UNTITLED);
        ops.push(set_font(FontStyle::Bold, theme::TITLE_SIZE));
        ops.push(DrawOp::SetTextColor(theme::PRIMARY));
        ops.push(DrawOp::Paragraph {
            text: title.to_string(),
            line_height: TITLE_LINE,
        });
        ops.push(DrawOp::Spacer { height: GAP_SMALL });

        ops.push(set_font(FontStyle::Regular, theme::META_SIZE));
        ops.push(DrawOp::SetTextColor(theme::SECONDARY));
        let id = if record.id.is_empty() {
            labels::NO_ID
        } else {
            &record.id
        };
        ops.push(line_cell(format!("{} {}", labels::ID_PREFIX, id), LINE));
        ops.push(line_cell(
            format!(
                "{} {}",
                labels::DATE_PREFIX,
                format_timestamp(&record.created_at)
            ),
            LINE,
        ));
        ops.push(DrawOp::Spacer { height: GAP_LARGE });
    }

    /// All user messages under a single heading, on the metadata page.
    fn consultation(&self, record: &ConversationRecord, ops: &mut Vec<DrawOp>) {
        let users: Vec<_> = record.user_messages().collect();
        if users.is_empty() {
            return;
        }
        self.chapter_title(labels::INITIAL_QUERY, ops);
        for msg in users {
            self.body(&msg.content, ops);
        }
    }

    /// The stage-1 appendix: every member response in stored order, each
    /// under a sub-heading with the simplified model name.
    fn member_appendix(&self, members: &[&MemberResponse], ops: &mut Vec<DrawOp>) {
        if members.is_empty() {
            debug!("no member responses, omitting appendix");
            return;
        }
        ops.push(DrawOp::AddPage);
        self.chapter_title(labels::MEMBER_RESPONSES, ops);
        ops.push(DrawOp::Spacer { height: GAP });
        for (i, member) in members.iter().enumerate() {
            if i > 0 && self.config.one_model_per_page {
                ops.push(DrawOp::AddPage);
                self.chapter_title(labels::MEMBER_RESPONSES_CONT, ops);
                ops.push(DrawOp::Spacer { height: GAP });
            }
            let name = member
                .model
                .as_deref()
                .filter(|m| !m.is_empty())
                .map(display_model_name)
                .unwrap_or(labels::UNKNOWN_MODEL);
            ops.push(set_font(FontStyle::Bold, theme::CHAPTER_SIZE));
            ops.push(DrawOp::SetTextColor(theme::TEXT_HEADER));
            ops.push(line_cell(
                format!("{} {}", labels::MEMBER_PREFIX, name),
                TITLE_LINE,
            ));
            ops.push(DrawOp::Spacer { height: GAP_SMALL });
            self.body(&member.response, ops);
        }
    }

    /// The stage-3 section: one titled block per rendered resolution, with
    /// the attributed model (or its placeholder) above the body.
    fn final_section(&self, finals: &[&FinalResponse], ops: &mut Vec<DrawOp>) {
        if finals.is_empty() {
            debug!("no final resolution, omitting section");
            return;
        }
        ops.push(DrawOp::AddPage);
        for resolution in finals {
            self.chapter_title(labels::FINAL_RESOLUTION, ops);
            ops.push(DrawOp::Spacer { height: GAP });
            let name = resolution
                .model
                .as_deref()
                .filter(|m| !m.is_empty())
                .map(display_model_name)
                .unwrap_or(labels::UNKNOWN_PRESIDENT);
            ops.push(set_font(FontStyle::Bold, theme::SECTION_SIZE));
            ops.push(DrawOp::SetTextColor(theme::PRIMARY));
            ops.push(line_cell(
                format!("{} {}", labels::PRESIDENT_PREFIX, name),
                LINE,
            ));
            ops.push(DrawOp::Spacer { height: GAP });
            self.body(&resolution.response, ops);
        }
    }

    /// Chapter heading with its accent bar.
    fn chapter_title(&self, label: &str, ops: &mut Vec<DrawOp>) {
        ops.push(DrawOp::AccentBar { height: HEAD_LINE });
        ops.push(set_font(FontStyle::Bold, theme::CHAPTER_SIZE));
        ops.push(DrawOp::SetTextColor(theme::TEXT_HEADER));
        ops.push(DrawOp::Cell {
            text: label.to_string(),
            height: HEAD_LINE,
            align: Align::Left,
            indent: TITLE_INDENT,
            underline: false,
        });
        ops.push(DrawOp::Spacer { height: GAP_SMALL });
    }

    /// Body text block. Empty text still occupies the slot so a heading is
    /// never silently dropped with it.
    fn body(&self, text: &str, ops: &mut Vec<DrawOp>) {
        ops.push(set_font(FontStyle::Regular, theme::BODY_SIZE));
        ops.push(DrawOp::SetTextColor(theme::BODY));
        ops.push(DrawOp::Paragraph {
            text: strip_markers(text),
            line_height: LINE,
        });
        ops.push(DrawOp::Spacer { height: LINE });
    }
}

fn set_font(style: FontStyle, size: f64) -> DrawOp {
    DrawOp::SetFont { style, size }
}

fn line_cell(text: String, height: f64) -> DrawOp {
    DrawOp::Cell {
        text,
        height,
        align: Align::Left,
        indent: 0.0,
        underline: false,
    }
}
