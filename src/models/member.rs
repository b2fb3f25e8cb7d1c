//! Association member model.

use serde::{Deserialize, Serialize};

string_enum! {
    /// Position within the association, in seniority order.
    Position {
        President => "president",
        VicePresident => "vice_president",
        Secretary => "secretary",
        Head => "head",
        Member => "member",
        Advisor => "advisor",
    }
}

string_enum! {
    /// Department a member works in.
    MemberDepartment {
        Honorary => "honorary",
        Executive => "executive",
        Liaison => "liaison",
        Pr => "pr",
        Events => "events",
        Accounting => "accounting",
        Documents => "documents",
        It => "it",
    }
}

/// A member listed in the members directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(default)]
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    #[serde(default)]
    pub picture: Option<String>,
    pub university: String,
    pub major: String,
    pub position: Position,
    pub department: MemberDepartment,
    /// False for alumni.
    #[serde(default = "default_working")]
    pub working: bool,
}

fn default_working() -> bool {
    true
}

/// Directory section requested by the members page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSection {
    All,
    /// Former members (`working == false`).
    Alumni,
    Department(MemberDepartment),
}

impl MemberSection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Some(MemberSection::All),
            "alumni" => Some(MemberSection::Alumni),
            other => MemberDepartment::parse(other).map(MemberSection::Department),
        }
    }

    pub fn includes(&self, member: &Member) -> bool {
        match self {
            MemberSection::All => true,
            MemberSection::Alumni => !member.working,
            MemberSection::Department(dept) => member.department == *dept,
        }
    }
}

/// Directory ordering: position seniority, then last name, then first name.
pub fn sort_directory(members: &mut [Member]) {
    members.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then_with(|| a.lastname.cmp(&b.lastname))
            .then_with(|| a.firstname.cmp(&b.firstname))
    });
}
