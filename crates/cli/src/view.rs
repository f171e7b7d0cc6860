use jbind_api::{FieldInfo, Member, Visibility};
use tabled::Tabled;

/// One method or constructor in a listing.
#[derive(Tabled)]
pub struct MemberRow {
    pub kind: String,
    pub signature: String,
    pub declared_in: String,
    pub modifiers: String,
}

#[derive(Tabled)]
pub struct FieldRow {
    pub name: String,
    #[tabled(rename = "type")]
    pub field_type: String,
    pub declared_in: String,
    pub modifiers: String,
}

impl From<&Member> for MemberRow {
    fn from(member: &Member) -> Self {
        let kind = if member.is_constructor() {
            "constructor"
        } else {
            "method"
        };
        Self {
            kind: kind.to_string(),
            signature: member.signature(),
            declared_in: member.declaring_type.to_string(),
            modifiers: modifiers(member.visibility, member.is_static, member.is_varargs),
        }
    }
}

impl From<&FieldInfo> for FieldRow {
    fn from(field: &FieldInfo) -> Self {
        Self {
            name: field.name.clone(),
            field_type: field.field_type.to_string(),
            declared_in: field.declaring_type.to_string(),
            modifiers: modifiers(field.visibility, field.is_static, false),
        }
    }
}

fn modifiers(visibility: Visibility, is_static: bool, is_varargs: bool) -> String {
    let mut out = vec![match visibility {
        Visibility::Public => "public",
        Visibility::Protected => "protected",
        Visibility::Package => "package",
        Visibility::Private => "private",
    }];
    if is_static {
        out.push("static");
    }
    if is_varargs {
        out.push("varargs");
    }
    out.join(" ")
}
