use crate::catalog::template::TemplateDescriptor;

/// (id, name, cost, tag, accent)
const BUILTIN: &[(u32, &str, u64, &str, &str)] = &[
    (1, "Classic", 0, "Free", "#4b5563"),
    (2, "Backdrop", 200, "Premium", "#9333ea"),
    (3, "Highlight", 300, "Popular", "#ca8a04"),
    (4, "Glow", 250, "New", "#06b6d4"),
    (5, "Mono", 100, "Editor's Choice", "#16a34a"),
    (6, "Elegant", 180, "Luxury", "#e11d48"),
    (7, "Comic", 150, "Fun", "#db2777"),
    (8, "Minimal", 50, "Minimal", "#3b82f6"),
];

pub(crate) fn builtin_templates() -> Vec<TemplateDescriptor> {
    BUILTIN
        .iter()
        .map(|&(id, name, cost, tag, accent)| {
            TemplateDescriptor::new(id, name, cost)
                .with_tag(tag)
                .with_accent(accent)
        })
        .collect()
}
