//! Rewrites plain references in rendered markdown into links.
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use url::Url;

use crate::Result;

const LOGIN_PATTERN: &str = r"[A-Za-z0-9][A-Za-z0-9-]*";

// "[text](url)", allowing one level of brackets inside the text
const LINK_PATTERN: &str = r"\[(?:[^\[\]\n]|\[[^\[\]\n]*\])*\]\([^)\n]*\)";

/// Links `#123` references, `@user` mentions and configured names.
///
/// Existing markdown links are matched first and passed through untouched,
/// which is what makes linking idempotent.
pub struct ContentLinker {
    repository_url: String,
    user_base_url: String,
    names: BTreeMap<String, String>,
    pattern: Regex,
}

impl ContentLinker {
    pub fn new(
        repository_url: &str,
        user_base_url: &str,
        names: BTreeMap<String, String>,
    ) -> Result<Self> {
        let repository_url = Url::parse(repository_url)?;
        let user_base_url = Url::parse(user_base_url)?;

        // a mention glued to "/", "_" or "@" is a package scope or an
        // address, not a login
        let mut pattern = format!(
            r"(?m)(?<link>{LINK_PATTERN})|\[#(?<bracketed_issue>\d+)\]|\[@(?<bracketed_login>{LOGIN_PATTERN})\]|(?<pre>^|[^\w\[/&#@])(?:#(?<issue>\d+)\b|@(?<login>{LOGIN_PATTERN})(?<suffix>\[bot\]|[/_@])?)"
        );

        if !names.is_empty() {
            // longest first so "Foo Bar" wins over "Foo"
            let mut escaped: Vec<&String> = names.keys().collect();
            escaped.sort_by_key(|name| std::cmp::Reverse(name.len()));
            let alternatives = escaped
                .iter()
                .map(|name| regex::escape(name))
                .collect::<Vec<String>>()
                .join("|");
            pattern.push_str(&format!(r"|\b(?<name>{alternatives})\b"));
        }

        Ok(Self {
            repository_url: repository_url
                .as_str()
                .trim_end_matches('/')
                .to_string(),
            user_base_url: user_base_url
                .as_str()
                .trim_end_matches('/')
                .to_string(),
            names,
            pattern: Regex::new(&pattern)?,
        })
    }

    pub fn linkify(&self, content: &str) -> String {
        self.pattern
            .replace_all(content, |captures: &Captures| {
                self.replace(captures)
            })
            .into_owned()
    }

    fn replace(&self, captures: &Captures) -> String {
        if let Some(link) = captures.name("link") {
            return link.as_str().to_string();
        }

        if let Some(id) = captures.name("bracketed_issue") {
            return self.issue_link(id.as_str());
        }

        if let Some(login) = captures.name("bracketed_login") {
            return self.user_link(login.as_str());
        }

        let pre = captures.name("pre").map_or("", |m| m.as_str());

        if let Some(id) = captures.name("issue") {
            return format!("{pre}{}", self.issue_link(id.as_str()));
        }

        if let Some(login) = captures.name("login") {
            return match captures.name("suffix").map(|m| m.as_str()) {
                None => format!("{pre}{}", self.user_link(login.as_str())),
                Some("[bot]") => {
                    format!("{pre}{}", self.bot_link(login.as_str()))
                }
                Some(_) => captures[0].to_string(),
            };
        }

        if let Some(name) = captures.name("name")
            && let Some(url) = self.names.get(name.as_str())
        {
            return format!("[{}]({url})", name.as_str());
        }

        captures[0].to_string()
    }

    fn issue_link(&self, id: &str) -> String {
        format!("[#{id}]({}/issues/{id})", self.repository_url)
    }

    fn user_link(&self, login: &str) -> String {
        format!("[@{login}]({}/{login})", self.user_base_url)
    }

    fn bot_link(&self, login: &str) -> String {
        format!("[@{login}[bot]]({}/apps/{login})", self.user_base_url)
    }
}
