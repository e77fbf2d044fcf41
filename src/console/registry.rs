use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Int,
    Bool,
    List,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamKind::String => "string",
            ParamKind::Int => "int",
            ParamKind::Bool => "bool",
            ParamKind::List => "list",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    /// Sent as a form field instead of a query parameter.
    pub post: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Method {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub params: &'static [Param],
    pub example: &'static str,
}

/// Accepted by every method.
pub const BEAUTIFY: Param = opt("beautify", ParamKind::Bool);

impl Method {
    pub fn all_params(&self) -> impl Iterator<Item = &Param> {
        self.params.iter().chain(std::iter::once(&BEAUTIFY))
    }
}

const fn req(name: &'static str, kind: ParamKind) -> Param {
    Param {
        name,
        kind,
        required: true,
        post: false,
    }
}

const fn opt(name: &'static str, kind: ParamKind) -> Param {
    Param {
        name,
        kind,
        required: false,
        post: false,
    }
}

const fn post(name: &'static str, kind: ParamKind, required: bool) -> Param {
    Param {
        name,
        kind,
        required,
        post: true,
    }
}

use ParamKind::{Bool, Int, List, String as Str};

pub const CATEGORIES: &[&str] = &[
    "Handshake",
    "Achievements",
    "Builds",
    "Uploads",
    "Settings",
    "AI",
    "FC2T Projects",
    "Member Management",
    "Perks",
    "Scripts",
    "Software",
    "Forum",
];

pub const METHODS: &[Method] = &[
    Method {
        name: "getHandshake",
        description: "Retrieves a license key using a temporary unique code.",
        category: "Handshake",
        params: &[req("token", Str)],
        example: "getHandshake --token UNIQUE_CODE_FROM_AUTHORIZE",
    },
    Method {
        name: "authorizeHandshake",
        description: "Creates a temporary unique code for your license key on the server.",
        category: "Handshake",
        params: &[],
        example: "authorizeHandshake",
    },
    Method {
        name: "terminateHandshake",
        description: "Forcefully terminates your handshake.",
        category: "Handshake",
        params: &[req("token", Str)],
        example: "terminateHandshake --token UNIQUE_CODE_FROM_AUTHORIZE",
    },
    Method {
        name: "getAchievements",
        description: "Lists all available achievements.",
        category: "Achievements",
        params: &[],
        example: "getAchievements",
    },
    Method {
        name: "redeemAchievements",
        description: "Redeems achievement data. Requires POST data.",
        category: "Achievements",
        params: &[post("value", Str, true)],
        example: "redeemAchievements --value \"<achievements.dat content>\"",
    },
    Method {
        name: "createBuild",
        description: "Creates a new build or updates your current build.",
        category: "Builds",
        params: &[opt("tag", Str), opt("private", Str)],
        example: "createBuild --tag mybuild --private typedef",
    },
    Method {
        name: "deleteBuild",
        description: "Wipes your current build.",
        category: "Builds",
        params: &[opt("tag", Str)],
        example: "deleteBuild --tag mybuild",
    },
    Method {
        name: "getBuilds",
        description: "Lists all available builds.",
        category: "Builds",
        params: &[],
        example: "getBuilds",
    },
    Method {
        name: "upload",
        description: "Uploads a file to i.constelia.ai.",
        category: "Uploads",
        params: &[opt("expire", Int), opt("no_scramble", Bool)],
        example: "upload --expire 60",
    },
    Method {
        name: "setUpload",
        description: "Changes the URL of an i.constelia.ai upload.",
        category: "Uploads",
        params: &[req("old_url", Str), req("new_url", Str)],
        example: "setUpload --old_url https://i.constelia.ai/old --new_url https://i.constelia.ai/new",
    },
    Method {
        name: "setLanguage",
        description: "Sets your language.",
        category: "Settings",
        params: &[opt("lang", Str)],
        example: "setLanguage --lang en",
    },
    Method {
        name: "setKeys",
        description: "Sets your linking and panic/stop key.",
        category: "Settings",
        params: &[opt("link", Int), opt("stop", Int)],
        example: "setKeys --link 122",
    },
    Method {
        name: "setProtection",
        description: "Sets the protection method of the FC2 solution.",
        category: "Settings",
        params: &[req("protection", Int)],
        example: "setProtection --protection 1",
    },
    Method {
        name: "resetConfiguration",
        description: "Safely deletes/resets the cloud configuration of a specific solution.",
        category: "Settings",
        params: &[],
        example: "resetConfiguration",
    },
    Method {
        name: "heyConstelia",
        description: "Communicates with Constelia's trained AI.",
        category: "AI",
        params: &[req("message", Str)],
        example: "heyConstelia --message \"Hello Constelia\"",
    },
    Method {
        name: "teachConstelia",
        description: "Teaches Constelia's trained AI custom information. Requires POST data.",
        category: "AI",
        params: &[post("data", Str, true), opt("info", Bool), opt("wipe", Bool)],
        example: "teachConstelia --data \"I love green apples\"",
    },
    Method {
        name: "getFC2TProjects",
        description: "Gets all FC2T projects.",
        category: "FC2T Projects",
        params: &[],
        example: "getFC2TProjects",
    },
    Method {
        name: "getFC2TProject",
        description: "Gets an FC2T project by its ID.",
        category: "FC2T Projects",
        params: &[req("id", Int)],
        example: "getFC2TProject --id 1",
    },
    Method {
        name: "toggleProjectStatus",
        description: "Enables/Disables an FC2T project.",
        category: "FC2T Projects",
        params: &[req("id", Int)],
        example: "toggleProjectStatus --id 1",
    },
    Method {
        name: "setMemberProjects",
        description: "Enables/Disables multiple FC2T projects.",
        category: "FC2T Projects",
        params: &[req("projects", List)],
        example: "setMemberProjects --projects [1,2,3]",
    },
    Method {
        name: "getMinecraftWhitelist",
        description: "Lists all members who are allowed on the Minecraft community server.",
        category: "Member Management",
        params: &[],
        example: "getMinecraftWhitelist",
    },
    Method {
        name: "addMinecraftWhitelist",
        description: "Adds/Updates a member to the Minecraft community server.",
        category: "Member Management",
        params: &[req("name", Str), req("owner", Str), opt("friend", Bool)],
        example: "addMinecraftWhitelist --name minecraftusername --owner typedef",
    },
    Method {
        name: "deleteMinecraftWhitelist",
        description: "Removes a member's entry from the Minecraft whitelist.",
        category: "Member Management",
        params: &[req("owner", Str)],
        example: "deleteMinecraftWhitelist --owner typedef",
    },
    Method {
        name: "getMemberAsBuddy",
        description: "Returns member information for a buddy or VIP.",
        category: "Member Management",
        params: &[req("name", Str)],
        example: "getMemberAsBuddy --name johnnyappleseed",
    },
    Method {
        name: "hideSteamAccount",
        description: "Hides a Steam account from appearing in the Member's Panel.",
        category: "Member Management",
        params: &[req("name", Str)],
        example: "hideSteamAccount --name mysteamloginusername",
    },
    Method {
        name: "showSteamAccount",
        description: "Allows a previously hidden Steam account to show.",
        category: "Member Management",
        params: &[req("name", Str)],
        example: "showSteamAccount --name mysteamloginusername",
    },
    Method {
        name: "getMember",
        description: "Gets information about your membership.",
        category: "Member Management",
        params: &[
            opt("bans", Bool),
            opt("history", Bool),
            opt("scripts", Bool),
            opt("simple", Bool),
            opt("private", Bool),
            opt("xp", Bool),
            opt("rolls", Bool),
            opt("fc2t", Bool),
            opt("hashes", Bool),
            opt("uploads", Bool),
            opt("bonks", Bool),
            opt("achievements", Bool),
        ],
        example: "getMember --scripts --history --bans",
    },
    Method {
        name: "respecPerks",
        description: "Removes all purchased perks at a cost of 3000 XP.",
        category: "Perks",
        params: &[],
        example: "respecPerks",
    },
    Method {
        name: "listPerks",
        description: "Lists all perks in the system.",
        category: "Perks",
        params: &[],
        example: "listPerks",
    },
    Method {
        name: "buyPerk",
        description: "Consumes a perk point to purchase a perk.",
        category: "Perks",
        params: &[req("id", Int)],
        example: "buyPerk --id 1",
    },
    Method {
        name: "changeVenus",
        description: "Manages Venus perk related actions (status, request, withdraw).",
        category: "Perks",
        params: &[opt("status", Bool), opt("request", Str), opt("withdraw", Bool)],
        example: "changeVenus --request MyBestFriend1337",
    },
    Method {
        name: "rollLoot",
        description: "Rolls for loot related to the Abundance of Jupiter perk.",
        category: "Perks",
        params: &[opt("sim", Bool)],
        example: "rollLoot --sim",
    },
    Method {
        name: "getDivinityChart",
        description: "Gets the divinity chart in JSON format.",
        category: "Perks",
        params: &[opt("top5", Bool)],
        example: "getDivinityChart --top5",
    },
    Method {
        name: "toggleScriptStatus",
        description: "Toggles a script on/off.",
        category: "Scripts",
        params: &[req("id", Int)],
        example: "toggleScriptStatus --id 130",
    },
    Method {
        name: "getScript",
        description: "Gets information about a script.",
        category: "Scripts",
        params: &[
            req("id", Int),
            opt("source", Bool),
            opt("needs_sync", Bool),
            opt("needs_update", Bool),
        ],
        example: "getScript --id 150 --source",
    },
    Method {
        name: "getAllScripts",
        description: "Gets all scripts.",
        category: "Scripts",
        params: &[],
        example: "getAllScripts",
    },
    Method {
        name: "updateScript",
        description: "Updates a script you own or are a team member of. Requires POST data.",
        category: "Scripts",
        params: &[
            post("script", Str, true),
            post("content", Str, true),
            post("notes", Str, true),
            post("categories", List, false),
        ],
        example: "updateScript --script 150 --content \"new code\" --notes \"bug fix\" --categories [0,1]",
    },
    Method {
        name: "setMemberScripts",
        description: "Sets multiple scripts on a license key.",
        category: "Scripts",
        params: &[req("scripts", List)],
        example: "setMemberScripts --scripts [140,141]",
    },
    Method {
        name: "getSoftware",
        description: "Gets information of a constelia.ai software.",
        category: "Software",
        params: &[req("name", Str), opt("scripts", Bool), opt("checksum", Bool)],
        example: "getSoftware --name Constellation4 --scripts",
    },
    Method {
        name: "getAllSoftware",
        description: "Gets all information of all constelia.ai software.",
        category: "Software",
        params: &[],
        example: "getAllSoftware",
    },
    Method {
        name: "getSolution",
        description: "Gets the raw executable for a constelia.ai solution.",
        category: "Software",
        params: &[req("software", Str), opt("os", Str)],
        example: "getSolution --software universe4 --os linux",
    },
    Method {
        name: "getForumPosts",
        description: "Gets the latest forum posts.",
        category: "Forum",
        params: &[req("count", Int)],
        example: "getForumPosts --count 10",
    },
    Method {
        name: "sendCommand",
        description: "Sends commands to the Member's Panel and gets the result back.",
        category: "Forum",
        params: &[req("command", Str)],
        example: "sendCommand --command session",
    },
    Method {
        name: "getConfiguration",
        description: "Gets your stored cloud configuration.",
        category: "Forum",
        params: &[],
        example: "getConfiguration",
    },
    Method {
        name: "setConfiguration",
        description: "Sets your cloud configuration. Requires POST data.",
        category: "Forum",
        params: &[post("value", Str, true)],
        example: "setConfiguration --value \"<json_config_data>\"",
    },
];

pub fn find(name: &str) -> Option<&'static Method> {
    METHODS.iter().find(|m| m.name == name)
}

/// Case-insensitive category lookup, returning the canonical spelling.
pub fn find_category(name: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .copied()
        .find(|c| c.eq_ignore_ascii_case(name))
}

pub fn methods_in(category: &str) -> impl Iterator<Item = &'static Method> + '_ {
    METHODS.iter().filter(move |m| m.category == category)
}

/// Method names starting with `prefix`, ignoring case.
pub fn suggestions(prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.trim().to_lowercase();
    if prefix.is_empty() {
        return Vec::new();
    }
    METHODS
        .iter()
        .map(|m| m.name)
        .filter(|name| name.to_lowercase().starts_with(&prefix))
        .collect()
}

/// Methods whose name or description, and categories whose name, contain
/// `keyword` (case-insensitive).
pub fn search(keyword: &str) -> (Vec<&'static Method>, Vec<&'static str>) {
    let keyword = keyword.to_lowercase();
    let methods = METHODS
        .iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&keyword)
                || m.description.to_lowercase().contains(&keyword)
        })
        .collect();
    let categories = CATEGORIES
        .iter()
        .copied()
        .filter(|c| c.to_lowercase().contains(&keyword))
        .collect();
    (methods, categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_is_consistent() {
        let mut seen = HashSet::new();
        for method in METHODS {
            assert!(seen.insert(method.name), "duplicate {}", method.name);
            assert!(CATEGORIES.contains(&method.category), "{}", method.name);
            assert!(method.example.starts_with(method.name), "{}", method.name);
        }
        for category in CATEGORIES {
            assert!(methods_in(category).next().is_some(), "{category} is empty");
        }
    }

    #[test]
    fn test_every_method_accepts_beautify() {
        let method = find("getAllScripts").unwrap();
        let names: Vec<&str> = method.all_params().map(|p| p.name).collect();
        assert_eq!(names, vec!["beautify"]);
    }

    #[test]
    fn test_suggestions_prefix_match() {
        assert_eq!(suggestions("getall"), vec!["getAllScripts", "getAllSoftware"]);
        assert!(suggestions("").is_empty());
        assert!(suggestions("zzz").is_empty());
    }

    #[test]
    fn test_search_and_categories() {
        let (methods, categories) = search("PERK");
        assert!(methods.iter().any(|m| m.name == "buyPerk"));
        assert_eq!(categories, vec!["Perks"]);
        assert_eq!(find_category("fc2t projects"), Some("FC2T Projects"));
        assert_eq!(find_category("nope"), None);
    }
}
