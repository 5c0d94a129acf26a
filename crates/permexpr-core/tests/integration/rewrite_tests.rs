//! Single-file component rewriting

use permexpr_core::{
    deserialize, rewrite_file_contents, OnError, Predicate, RewriteError, RewriteOptions,
};

const COMPONENT: &str = r#"<template>
  <div class="toolbar">
    <button v-permission="'Has(edit)'" @click="save">Save</button>
    <button v-permission="'Some(admin, owner) And Not locked'">Delete</button>
    <template v-if="ready">
      <span v-permission="dynamicRule">Status</span>
    </template>
  </div>
</template>

<script setup>
const dynamicRule = "{'type':'HAS','val':'view'}";
</script>
"#;

#[test]
fn test_component_rewrite() {
    let out = rewrite_file_contents("src/Toolbar.vue", COMPONENT, &RewriteOptions::default()).unwrap();
    assert_eq!(out.rewritten, 2);
    assert_eq!(out.skipped, 0);

    let expected = COMPONENT
        .replace("'Has(edit)'", "{'type':'HAS','val':'edit'}")
        .replace(
            "'Some(admin, owner) And Not locked'",
            "{'type':'AND','lhs':{'type':'SOME','val':['admin','owner']},'rhs':{'type':'NOT','expr':{'type':'HAS','val':'locked'}}}",
        );
    assert_eq!(out.code, expected);
}

#[test]
fn test_rewritten_values_deserialize() {
    let out = rewrite_file_contents("Toolbar.vue", COMPONENT, &RewriteOptions::default()).unwrap();
    let marker = "v-permission=\"";
    let start = out.code.find(marker).unwrap() + marker.len();
    let end = start + out.code[start..].find('"').unwrap();

    assert_eq!(deserialize(&out.code[start..end]).unwrap(), Predicate::has("edit"));
}

#[test]
fn test_rewrite_is_idempotent() {
    let options = RewriteOptions::default();
    let once = rewrite_file_contents("Toolbar.vue", COMPONENT, &options).unwrap();
    let twice = rewrite_file_contents("Toolbar.vue", &once.code, &options).unwrap();
    assert_eq!(twice.code, once.code);
    assert_eq!(twice.rewritten, 0);
}

#[test]
fn test_error_policies() {
    let source = "<template><b v-permission=\"'Has(a) Or'\"></b></template>";

    let err = rewrite_file_contents("Bad.vue", source, &RewriteOptions::default()).unwrap_err();
    match &err {
        RewriteError::Expression { expression, offset, .. } => {
            assert_eq!(expression, "Has(a) Or");
            assert_eq!(*offset, source.find('\'').unwrap());
        }
        other => panic!("unexpected error: {}", other),
    }

    let options = RewriteOptions::default().on_error(OnError::Skip);
    let out = rewrite_file_contents("Bad.vue", source, &options).unwrap();
    assert_eq!(out.code, source);
    assert_eq!(out.skipped, 1);
}

#[test]
fn test_non_component_sources_pass_through() {
    for path in ["Toolbar.ts", "Toolbar.vue.bak", "README"] {
        let out = rewrite_file_contents(path, COMPONENT, &RewriteOptions::default()).unwrap();
        assert_eq!(out.code, COMPONENT, "{}", path);
    }
}
