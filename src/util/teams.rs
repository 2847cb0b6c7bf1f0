use std::fmt;

use serde::Serialize;

// Registered display names, team ids 101..=200.
static TEAM_NAMES: [(u32, &str); 100] = [
    (101, "Sparkle"),
    (102, "Brogrammers"),
    (103, "Codehub"),
    (104, "Impostor_coder"),
    (105, "Alt_F4"),
    (106, "Terminal Spoolers"),
    (107, "BlackHat Buffs"),
    (108, "Coda-Sorous"),
    (109, "Orion"),
    (110, "PyJa Alchemists"),
    (111, "TechSpark"),
    (112, "Ctrl C+ Ctrl V"),
    (113, "XP Hunters"),
    (114, "Cache Me If You Can"),
    (115, "Techtonic"),
    (116, "2bitHacker"),
    (117, "Charlie"),
    (118, "Bug Smashers"),
    (119, "CriticalDuo"),
    (120, "Mumbai Indians"),
    (121, "Uncs_fromholysinc"),
    (122, "Tech nova"),
    (123, "2 Guys 1 Bug"),
    (124, "AlgoRhythms"),
    (125, "Team Explorers"),
    (126, "Rizzlers"),
    (127, "Hustlers"),
    (128, "JARVIS"),
    (129, "The Masters"),
    (130, "Shel-earners"),
    (131, "The Shell Troopers"),
    (132, "D2"),
    (133, "The digital disruptors"),
    (134, "Knight Coders"),
    (135, "The ultimate"),
    (136, "The Silent shells"),
    (137, "Seekers"),
    (138, "OFI"),
    (139, "Team blue"),
    (140, "PairCoders [M]^2"),
    (141, "2gether"),
    (142, "Let it Happen"),
    (143, "PseudoCoders"),
    (144, "TeamDriver"),
    (145, "Cryptic Coders"),
    (146, "XL1"),
    (147, "The techies"),
    (148, "YSRJ CRANUXX"),
    (149, "Clue finders"),
    (150, "ShadowSec"),
    (151, "Dynamic"),
    (152, "codeDuo"),
    (153, "Code Warriors"),
    (154, "Byte Busters"),
    (155, "Shell Seekers"),
    (156, "Terminal Masters"),
    (157, "Code Breakers"),
    (158, "Digital Ninjas"),
    (159, "Tech Titans"),
    (160, "Cyber Champions"),
    (161, "Logic Legends"),
    (162, "Binary Blazers"),
    (163, "Data Dynamos"),
    (164, "Script Spartans"),
    (165, "Pixel Pirates"),
    (166, "Code Crusaders"),
    (167, "Tech Troopers"),
    (168, "Digital Dragons"),
    (169, "Byte Bandits"),
    (170, "Terminal Titans"),
    (171, "Shell Strikers"),
    (172, "Code Commandos"),
    (173, "Tech Templars"),
    (174, "Digital Detectives"),
    (175, "Binary Bombers"),
    (176, "Script Soldiers"),
    (177, "Pixel Pioneers"),
    (178, "Code Conquerors"),
    (179, "Tech Tacticians"),
    (180, "Digital Defenders"),
    (181, "Byte Builders"),
    (182, "Terminal Trackers"),
    (183, "Shell Shamans"),
    (184, "Code Crafters"),
    (185, "Tech Thunders"),
    (186, "Digital Daredevils"),
    (187, "Binary Beasts"),
    (188, "Script Snipers"),
    (189, "Pixel Predators"),
    (190, "Code Cardinals"),
    (191, "Tech Tigers"),
    (192, "Digital Diamonds"),
    (193, "Byte Blazers"),
    (194, "Terminal Terminators"),
    (195, "Shell Shooters"),
    (196, "Code Catalysts"),
    (197, "Tech Tornadoes"),
    (198, "Digital Dynasts"),
    (199, "Binary Bullets"),
    (200, "Script Supreme"),
];

// Branch and members per team, extracted from registration data. Sparse:
// only teams that completed registration appear.
static TEAM_BRANCHES: [(u32, &str, [&str; 2]); 56] = [
    (101, "IT B", ["Hukmeet Kaur Chhina", "Arnav Katiyar"]),
    (102, "EI/ETC A", ["Shubham kotwani", "Ayush pyasi"]),
    (103, "ETC A", ["Meghraj singh rajput", "Ansh Gupta"]),
    (104, "IT A", ["Vrushali Jain", "Atharva Upasani"]),
    (105, "CS A/EI", ["Shreyash Banzal", "Rhythm Surana"]),
    (106, "CSBS", ["Advait Kshirsagar", "Gurpreet Singh Bhatia"]),
    (107, "EI", ["Anushka Chandravanshi", "Adarsh Singh"]),
    (108, "EI", ["Tanmay Vishwakarma", "Mayank Jain"]),
    (109, "CS A", ["PARTH YADAV", "AASTHA AGRAWAL"]),
    (110, "CS A", ["Kavya Sahu", "Stuti Jain"]),
    (111, "CS A", ["Sarthak Geete", "Kaif Jilani"]),
    (112, "IT A", ["Rochak Jain", "Bhavik Agrawal"]),
    (113, "CS A/CS B", ["Gajal Gupta", "Shivani Chaurasiya"]),
    (114, "CS B/IT B", ["Ansh Zamde", "Tamanna Gupta"]),
    (115, "EI/ETC A", ["Prerna Singhal", "Antima Singh Chauhan"]),
    (116, "IT A", ["priyanshu", "abhay"]),
    (117, "CSBS", ["Parv Bafna", "Yash Yadav"]),
    (118, "CSBS/CS B", ["Kanha Agrawal", "Rudra Pratap Singh"]),
    (119, "CS A/IT A", ["Pushpit Upadhyay", "Anivartak Jain"]),
    (120, "IT A", ["Sunnitesh Sharma", "Ayush gupta"]),
    (121, "IT A", ["Aryan Singh", "Dharmendra Gupta"]),
    (122, "IT A", ["Yashasvi sharma", "Divyansh dahima"]),
    (123, "IT A", ["Rishabh Bohra", "Abhisar Kanude"]),
    (124, "CS B", ["Nimisha Agarwal", "Siddhant jain"]),
    (125, "IT A/EI", ["Priyanshi Ghosh", "Shivi yadav"]),
    (126, "CS B", ["Uthkarsh Mandloi", "Prakhar Porwal"]),
    (127, "CS A/IT B", ["Samayara Verma", "Kanishka Joshi"]),
    (128, "IT A", ["AMAN AJMERI", "LUCKY LODHI"]),
    (129, "IT A/IT B", ["Dron Nema", "Shubham Jha"]),
    (130, "CS B", ["Priyanshi Jhariya", "Renée Wadhwa"]),
    (131, "CS A", ["Abhijeet Junwal", "Rohan Bairagi"]),
    (132, "CS A/IT B", ["Garv Sharma", "Rachna Surjaye"]),
    (133, "EI", ["Shubham shah", "Anushka bhandari"]),
    (134, "IT A/IT B", ["Om Asati", "Raghav Maheshwari"]),
    (135, "EI", ["Ayush Namdev", "Kushal mukati"]),
    (136, "IT B", ["Khushi Singh", "Disha Gupta"]),
    (137, "IT B", ["Bhavya Agrawat", "Sara Verma"]),
    (138, "CSBS/CS A", ["Prakhar", "Piyush Rawat"]),
    (139, "CSBS", ["Bhumi Jain", "Gauri Paliwal"]),
    (140, "CS B", ["Mahi Rathore", "Mahak Bansal"]),
    (141, "IT B/CSBS", ["Radhika Pande", "Bhumika Patil"]),
    (142, "IT A", ["Ayush Sharma", "Dhruv Chourey"]),
    (143, "ETC B/IT B", ["Anshika Agrawal", "Chitransh Sahu"]),
    (144, "EI/CS B", ["Yamini Prajapati", "Sonam Ahirwar"]),
    (145, "CS A", ["Sejal Soni", "Pranjal Chawda"]),
    (146, "CS A/CS B", ["Amish Mahajan", "Shubhansh Srivastav"]),
    (147, "IT A", ["Nidhi Dahare", "Mahak Soni"]),
    (148, "IT A/CS A", ["Yashmanglam Soni", "Ritvika jain"]),
    (149, "IT B", ["Ayushi Pandey", "Shubhshree Umbarkar"]),
    (150, "IT B", ["MohammedKapadia", "Hemant Salame"]),
    (151, "ETC A", ["Harmeet", "Antima singh"]),
    (152, "IT B/IT A", ["anmol", "Priyanshu"]),
    (153, "IT B", ["MohammedKapadia", "Hemant Salame"]),
    (156, "CS A", ["Priyanshu arya", "Chandrashekhar rathore"]),
    (157, "IT B", ["Jaywardhan Singh Chauhan", "Kuldeep"]),
    (158, "CS B", ["Vikas Jaiswal", "Siddhant Jain"]),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BranchCategory {
    #[serde(rename = "Computer Science")]
    ComputerScience,
    #[serde(rename = "Information Technology")]
    InformationTechnology,
    #[serde(rename = "Electronics")]
    Electronics,
    #[serde(rename = "Mixed")]
    Mixed,
    #[serde(rename = "Other")]
    Other,
}

impl fmt::Display for BranchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BranchCategory::ComputerScience => "Computer Science",
            BranchCategory::InformationTechnology => "Information Technology",
            BranchCategory::Electronics => "Electronics",
            BranchCategory::Mixed => "Mixed",
            BranchCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

static CS_BRANCHES: [&str; 3] = ["CS A", "CS B", "CSBS"];
static IT_BRANCHES: [&str; 2] = ["IT A", "IT B"];
static ELECTRONICS_BRANCHES: [&str; 3] = ["EI", "ETC A", "ETC B"];
// Composite labels like "CS A/IT B" are cross-branch teams.
static MIXED_BRANCHES: [&str; 14] = [
    "CS A/CS B",
    "IT A/IT B",
    "EI/ETC A",
    "CS A/EI",
    "CSBS/CS A",
    "ETC B/IT B",
    "IT B/CSBS",
    "CS B/IT B",
    "CS A/IT A",
    "IT A/EI",
    "CS A/IT B",
    "EI/CS B",
    "IT A/CS A",
    "CSBS/CS B",
];

fn branch_entry(team_id: &str) -> Option<&'static (u32, &'static str, [&'static str; 2])> {
    let id = team_id.parse::<u32>().ok()?;
    TEAM_BRANCHES.iter().find(|(tid, _, _)| *tid == id)
}

pub fn team_name(team_id: &str) -> String {
    team_id
        .parse::<u32>()
        .ok()
        .and_then(|id| TEAM_NAMES.iter().find(|(tid, _)| *tid == id))
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| format!("Team {team_id}"))
}

pub fn team_branch(team_id: &str) -> &'static str {
    branch_entry(team_id).map(|(_, branch, _)| *branch).unwrap_or("Unknown")
}

pub fn team_members(team_id: &str) -> &'static [&'static str] {
    branch_entry(team_id)
        .map(|(_, _, members)| members.as_slice())
        .unwrap_or(&[])
}

pub fn branch_category(branch: &str) -> BranchCategory {
    if CS_BRANCHES.contains(&branch) {
        BranchCategory::ComputerScience
    } else if IT_BRANCHES.contains(&branch) {
        BranchCategory::InformationTechnology
    } else if ELECTRONICS_BRANCHES.contains(&branch) {
        BranchCategory::Electronics
    } else if MIXED_BRANCHES.contains(&branch) {
        BranchCategory::Mixed
    } else {
        BranchCategory::Other
    }
}

/// Distinct registered branch labels, first-seen order.
pub fn all_branches() -> Vec<&'static str> {
    let mut seen = Vec::new();
    for (_, branch, _) in TEAM_BRANCHES.iter() {
        if !seen.contains(branch) {
            seen.push(branch);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_team_resolves_name_and_branch() {
        assert_eq!(team_name("101"), "Sparkle");
        assert_eq!(team_branch("101"), "IT B");
        assert_eq!(
            team_members("101"),
            ["Hukmeet Kaur Chhina", "Arnav Katiyar"]
        );
    }

    #[test]
    fn unknown_team_falls_back() {
        assert_eq!(team_name("321"), "Team 321");
        assert_eq!(team_name("not-a-number"), "Team not-a-number");
        assert_eq!(team_branch("321"), "Unknown");
        assert!(team_members("321").is_empty());
    }

    #[test]
    fn named_team_without_registration_data_has_unknown_branch() {
        // 154 has a display name but never completed registration.
        assert_eq!(team_name("154"), "Byte Busters");
        assert_eq!(team_branch("154"), "Unknown");
    }

    #[test]
    fn branch_classification() {
        assert_eq!(branch_category("CS A"), BranchCategory::ComputerScience);
        assert_eq!(branch_category("CSBS"), BranchCategory::ComputerScience);
        assert_eq!(
            branch_category("IT B"),
            BranchCategory::InformationTechnology
        );
        assert_eq!(branch_category("ETC A"), BranchCategory::Electronics);
        assert_eq!(branch_category("CS A/IT B"), BranchCategory::Mixed);
        assert_eq!(branch_category("Unknown"), BranchCategory::Other);
        assert_eq!(branch_category("BBA"), BranchCategory::Other);
    }

    #[test]
    fn all_branches_is_deduplicated() {
        let branches = all_branches();
        assert!(branches.contains(&"IT B"));
        assert_eq!(
            branches.iter().filter(|b| **b == "IT B").count(),
            1,
            "each label appears once"
        );
    }
}
