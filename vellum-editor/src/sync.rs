//! State synchronizer: minimal host → editor pushes per observed change.
//!
//! Holds the last value known to have been synchronized for each field and
//! compares by value at every checkpoint. Baselines are recorded before the
//! scripts are handed back, so the same snapshot seen twice issues nothing
//! the second time. All mutation happens on the single owner context; no
//! locking is involved.

use crate::protocol::{CompilerOptions, DisplayConfig, EditorConfig, ExtraLib};
use crate::script;

pub struct StateSynchronizer {
    last_text: String,
    last_options: Option<CompilerOptions>,
    last_libs: Vec<ExtraLib>,
    last_display: DisplayConfig,
}

impl StateSynchronizer {
    /// Baselines start at the values the bootstrap script already pushed.
    pub fn new(initial: &EditorConfig) -> StateSynchronizer {
        StateSynchronizer {
            last_text: initial.text.clone(),
            last_options: initial.compiler_options.clone(),
            last_libs: initial.extra_libs.clone(),
            last_display: initial.display.clone(),
        }
    }

    /// Diff `config` against the synchronized baselines and return the
    /// scripts to evaluate, in issue order. Each changed field yields exactly
    /// one script; unchanged fields yield none. Fields are independent.
    pub fn synchronize(&mut self, config: &EditorConfig) -> Vec<String> {
        let mut scripts = Vec::new();

        if config.text != self.last_text {
            self.last_text = config.text.clone();
            scripts.push(script::set_text(&config.text));
        }

        if config.compiler_options != self.last_options {
            self.last_options = config.compiler_options.clone();
            scripts.push(script::set_compiler_options(config.compiler_options.as_ref()));
        }

        if config.extra_libs != self.last_libs {
            self.last_libs = config.extra_libs.clone();
            scripts.push(script::set_extra_libs(&config.extra_libs));
        }

        if config.display != self.last_display {
            self.last_display = config.display.clone();
            scripts.push(script::update_display_options(&config.display));
        }

        scripts
    }

    /// Record text the editor itself reported. The edit becomes the new
    /// baseline so the next checkpoint does not push the same text straight
    /// back at the editor.
    pub fn note_editor_text(&mut self, text: &str) {
        self.last_text = text.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{OptionValue, Theme};

    fn base_config() -> EditorConfig {
        EditorConfig::new("hello").theme(Theme::Dark)
    }

    #[test]
    fn unchanged_snapshot_issues_nothing() {
        let config = base_config();
        let mut sync = StateSynchronizer::new(&config);
        assert!(sync.synchronize(&config).is_empty());
        assert!(sync.synchronize(&config).is_empty());
    }

    #[test]
    fn text_change_issues_exactly_one_push() {
        let config = base_config();
        let mut sync = StateSynchronizer::new(&config);

        let edited = EditorConfig { text: "hello, world".to_string(), ..config.clone() };
        let scripts = sync.synchronize(&edited);
        assert_eq!(scripts.len(), 1);
        assert!(scripts[0].contains("setText"));

        // Same value again: idempotent.
        assert!(sync.synchronize(&edited).is_empty());
    }

    #[test]
    fn compiler_options_push_is_idempotent() {
        let config = base_config();
        let mut sync = StateSynchronizer::new(&config);

        let options = CompilerOptions::new().set("strict", OptionValue::Bool(true));
        let updated = EditorConfig { compiler_options: Some(options), ..config.clone() };

        assert_eq!(sync.synchronize(&updated).len(), 1);
        assert!(sync.synchronize(&updated.clone()).is_empty());
    }

    #[test]
    fn equal_lib_lists_do_not_repush_and_changed_lists_push_the_full_list() {
        let l1 = EditorConfig::new("x").extra_lib("declare const a: number;", "a.d.ts");
        let mut sync = StateSynchronizer::new(&l1);

        // L1 then L1 again: no push.
        assert!(sync.synchronize(&l1.clone()).is_empty());

        // L1 then L2 differing by one entry: one push carrying the whole list.
        let l2 = l1.clone().extra_lib("declare const b: number;", "b.d.ts");
        let scripts = sync.synchronize(&l2);
        assert_eq!(scripts.len(), 1);
        assert!(scripts[0].contains("setExtraLibs"));
        assert!(scripts[0].contains(&script::encode_text("declare const a: number;")));
        assert!(scripts[0].contains(&script::encode_text("declare const b: number;")));
    }

    #[test]
    fn fields_diff_independently() {
        let config = base_config();
        let mut sync = StateSynchronizer::new(&config);

        // Only the font size changes: one display update, no text/options/libs.
        let resized = config.clone().font_size(14);
        let scripts = sync.synchronize(&resized);
        assert_eq!(scripts.len(), 1);
        assert!(scripts[0].contains("updateOptions"));
        assert!(scripts[0].contains("fontSize: 14"));
    }

    #[test]
    fn multiple_changed_fields_issue_one_push_each() {
        let config = base_config();
        let mut sync = StateSynchronizer::new(&config);

        let updated = EditorConfig {
            text: "edited".to_string(),
            compiler_options: Some(CompilerOptions::new().set("strict", OptionValue::Bool(true))),
            ..config.clone()
        };
        let scripts = sync.synchronize(&updated);
        assert_eq!(scripts.len(), 2);
        assert!(scripts[0].contains("setText"));
        assert!(scripts[1].contains("updateDefaultTypescriptCompilerOptions"));
    }

    #[test]
    fn editor_reported_text_becomes_the_baseline() {
        let config = base_config();
        let mut sync = StateSynchronizer::new(&config);

        // The user typed in the editor; the host adopts the new value.
        sync.note_editor_text("hello from the editor");
        let adopted = EditorConfig { text: "hello from the editor".to_string(), ..config };
        assert!(sync.synchronize(&adopted).is_empty());
    }

    #[test]
    fn clearing_compiler_options_pushes_empty_object() {
        let with_options = base_config()
            .compiler_options(CompilerOptions::new().set("strict", OptionValue::Bool(true)));
        let mut sync = StateSynchronizer::new(&with_options);

        let cleared = EditorConfig { compiler_options: None, ..with_options };
        let scripts = sync.synchronize(&cleared);
        assert_eq!(scripts.len(), 1);
        assert!(scripts[0].contains("updateDefaultTypescriptCompilerOptions({ });"));
    }
}
