// Static completion text; the context list is the only dynamic part.
const TEMPLATE: &str = r#"_signoff() {
    local cur verbs contexts
    COMPREPLY=()
    cur="${COMP_WORDS[COMP_CWORD]}"
    verbs="create install uninstall check status version completion help"
    contexts="@CONTEXTS@"
    if [[ ${COMP_CWORD} -eq 1 ]]; then
        COMPREPLY=( $(compgen -W "${verbs}" -- "${cur}") )
    else
        COMPREPLY=( $(compgen -W "${contexts}" -- "${cur}") )
    fi
    return 0
}
complete -F _signoff signoff
"#;

/// Bash completion for the `signoff` verbs, with the supplied labels as
/// completable context arguments.
pub fn bash(contexts: &[String]) -> String {
    TEMPLATE.replace("@CONTEXTS@", &contexts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_every_verb_and_the_supplied_contexts() {
        let text = bash(&["tests".to_string(), "lint".to_string()]);
        for verb in [
            "create",
            "install",
            "uninstall",
            "check",
            "status",
            "version",
            "completion",
            "help",
        ] {
            assert!(text.contains(verb), "missing verb {verb}");
        }
        assert!(text.contains("tests lint"));
        assert!(text.contains("complete -F _signoff signoff"));
    }

    #[test]
    fn renders_without_contexts() {
        let text = bash(&[]);
        assert!(text.contains("contexts=\"\""));
    }
}
