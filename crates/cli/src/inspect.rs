use crate::MemberFilter;
use crate::view::{FieldRow, MemberRow};
use jbind_api::{CONSTRUCTOR_NAME, FieldInfo, Member, MemberKind, TypeDirectory, TypeHandle};
use jbind_core::ClassInspector;
use tabled::Table;
use tabled::settings::Style;

pub fn convertible<D: TypeDirectory>(
    inspector: &ClassInspector<D>,
    from: &str,
    to: &str,
    mix: bool,
) -> jbind_core::Result<()> {
    let verdict = if inspector.is_convertible(from, to, mix)? {
        "convertible"
    } else {
        "not convertible"
    };
    let regime = if mix { "mixed" } else { "strict" };
    println!("{from} -> {to}: {verdict} ({regime})");
    Ok(())
}

fn collect_members<D: TypeDirectory>(
    directory: &D,
    ty: &TypeHandle,
    filter: MemberFilter,
    name: Option<&str>,
) -> jbind_core::Result<(Vec<Member>, Vec<FieldInfo>)> {
    let mut members: Vec<Member> = Vec::new();
    if matches!(filter, MemberFilter::All | MemberFilter::Constructors)
        && name.is_none_or(|n| n == CONSTRUCTOR_NAME)
    {
        members.extend(directory.list_members(ty, MemberKind::Constructor, None)?);
    }
    if matches!(filter, MemberFilter::All | MemberFilter::Methods) {
        members.extend(directory.list_members(ty, MemberKind::Method, name)?);
    }
    let mut fields = Vec::new();
    if matches!(filter, MemberFilter::All | MemberFilter::Fields) && ty.class_name().is_some() {
        fields = directory.public_fields(ty)?;
        if let Some(name) = name {
            fields.retain(|f| f.name == name);
        }
    }
    Ok((members, fields))
}

pub fn members<D: TypeDirectory>(
    inspector: &ClassInspector<D>,
    type_name: &str,
    filter: MemberFilter,
    name: Option<&str>,
    json: bool,
) -> jbind_core::Result<()> {
    let directory = inspector.directory();
    let ty = directory.resolve_type_by_name(type_name)?;
    let (members, fields) = collect_members(directory, &ty, filter, name)?;

    if json {
        let value = serde_json::json!({ "members": members, "fields": fields });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if members.is_empty() && fields.is_empty() {
        println!("{ty} has no matching public members.");
        return Ok(());
    }
    if !members.is_empty() {
        let rows: Vec<MemberRow> = members.iter().map(MemberRow::from).collect();
        println!("{}", Table::new(rows).with(Style::psql()));
    }
    if !fields.is_empty() {
        let rows: Vec<FieldRow> = fields.iter().map(FieldRow::from).collect();
        println!("{}", Table::new(rows).with(Style::psql()));
    }
    Ok(())
}

pub fn describe_type<D: TypeDirectory>(
    inspector: &ClassInspector<D>,
    type_name: &str,
    json: bool,
) -> jbind_core::Result<()> {
    let directory = inspector.directory();
    let ty = directory.resolve_type_by_name(type_name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ty)?);
        return Ok(());
    }

    let kind = if ty.is_void() {
        "void"
    } else if ty.is_primitive() {
        "primitive"
    } else if ty.is_array() {
        "array"
    } else if ty.is_interface() {
        "interface"
    } else {
        "class"
    };
    println!("{ty} ({kind})");
    if ty.is_array() {
        println!("  dimensions: {}", ty.dimensions());
        println!("  element:    {}", ty.element_type());
    }
    if let Some(primitive) = ty.primitive_kind() {
        println!("  primitive:  {}", primitive.keyword());
        println!("  wrapper:    {}", primitive.wrapper_name());
    }
    println!("  accessible: {}", directory.is_accessible(&ty));

    let supertypes: Vec<String> = directory.walk_supertypes(&ty).map(|t| t.to_string()).collect();
    if !supertypes.is_empty() {
        println!("  supertypes: {}", supertypes.join(", "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jbind_core::adapters::MemoryDirectory;

    fn string_members(filter: MemberFilter, name: Option<&str>) -> (Vec<Member>, Vec<FieldInfo>) {
        let directory = MemoryDirectory::with_java_lang();
        let ty = directory.load_class("java.lang.String").unwrap();
        collect_members(&directory, &ty, filter, name).unwrap()
    }

    #[test]
    fn name_filter_skips_constructors() {
        let (members, _) = string_members(MemberFilter::All, Some("length"));
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].kind, MemberKind::Method);
        assert_eq!(members[0].name, "length");
    }

    #[test]
    fn constructor_name_lists_only_constructors() {
        let (members, fields) = string_members(MemberFilter::All, Some(CONSTRUCTOR_NAME));
        assert_eq!(members.len(), 3);
        assert!(members.iter().all(|m| m.kind == MemberKind::Constructor));
        assert!(fields.is_empty());
    }

    #[test]
    fn unfiltered_listing_includes_constructors() {
        let (members, _) = string_members(MemberFilter::Constructors, None);
        assert_eq!(members.len(), 3);
    }
}
