//! Typed request/response bodies for the Configuration service RPCs.
//!
//! Requests are rendered to the envelope's `<call>` body; responses are
//! extracted from the `<return>` element. Unknown attributes and elements in
//! responses are tolerated.

use vantage_common::{escape_xml, ClientError, ClientResult, Vid, XmlElement};

/// Firmware version tuple returned by `IIntrospection.GetVersion`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionInfo {
    /// Kernel image version.
    pub kernel: Option<String>,
    /// Root filesystem image version.
    pub rootfs: Option<String>,
    /// Application image version.
    pub app: Option<String>,
}

impl VersionInfo {
    pub(crate) fn from_return(ret: &XmlElement) -> Self {
        let text = |name: &str| {
            ret.child_text(name)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Self {
            kernel: text("kernel"),
            rootfs: text("rootfs"),
            app: text("app"),
        }
    }
}

/// Render the `ILogin.Login` call body.
pub(crate) fn render_login(user: &str, password: &str) -> String {
    format!(
        "<User>{}</User><Password>{}</Password>",
        escape_xml(user),
        escape_xml(password)
    )
}

/// Render the `IConfiguration.OpenFilter` call body.
pub(crate) fn render_open_filter(object_types: &[&str], xpath: Option<&str>) -> String {
    let mut body = String::new();

    if !object_types.is_empty() {
        body.push_str("<Objects>");
        for object_type in object_types {
            body.push_str("<ObjectType>");
            body.push_str(&escape_xml(object_type));
            body.push_str("</ObjectType>");
        }
        body.push_str("</Objects>");
    }

    if let Some(xpath) = xpath {
        body.push_str("<XPath>");
        body.push_str(&escape_xml(xpath));
        body.push_str("</XPath>");
    }

    body
}

/// Render the `IConfiguration.GetFilterResults` call body.
pub(crate) fn render_get_filter_results(handle: i32, count: u32, whole_object: bool) -> String {
    format!(
        "<hFilter>{handle}</hFilter><Count>{count}</Count><WholeObject>{whole_object}</WholeObject>"
    )
}

/// Render the `IConfiguration.GetObject` call body.
pub(crate) fn render_get_object(vids: &[Vid]) -> String {
    let mut body = String::new();
    for vid in vids {
        body.push_str("<VID>");
        body.push_str(&vid.to_string());
        body.push_str("</VID>");
    }
    body
}

/// Parse a boolean `<return>` body (`true`/`false` or `1`/`0`).
pub(crate) fn parse_bool_return(ret: &XmlElement) -> ClientResult<bool> {
    match ret.text.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        other => Err(ClientError::Decode(format!(
            "invalid boolean return value: {other:?}"
        ))),
    }
}

/// Parse an integer `<return>` body.
pub(crate) fn parse_int_return(ret: &XmlElement) -> ClientResult<i32> {
    ret.text
        .trim()
        .parse()
        .map_err(|_| ClientError::Decode(format!("invalid integer return value: {:?}", ret.text)))
}

/// Extract the object elements of a `GetFilterResults`/`GetObject` return.
///
/// Each entry is an `<Object>` wrapper; when the wrapper holds exactly one
/// child element, that inner element is the object. Wrappers with any other
/// structure are yielded whole.
pub(crate) fn parse_object_return(ret: &XmlElement) -> Vec<XmlElement> {
    ret.children_named("Object")
        .map(|wrapper| {
            if wrapper.children.len() == 1 {
                wrapper.children[0].clone()
            } else {
                wrapper.clone()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_login_escapes() {
        assert_eq!(
            render_login("admin", "p<s>&d"),
            "<User>admin</User><Password>p&lt;s&gt;&amp;d</Password>"
        );
    }

    #[test]
    fn test_render_open_filter_types() {
        assert_eq!(
            render_open_filter(&["Load", "Vantage.DGColorLoad"], None),
            "<Objects><ObjectType>Load</ObjectType>\
             <ObjectType>Vantage.DGColorLoad</ObjectType></Objects>"
        );
    }

    #[test]
    fn test_render_open_filter_xpath() {
        assert_eq!(
            render_open_filter(&[], Some("/*[@VID='12']")),
            "<XPath>/*[@VID=&apos;12&apos;]</XPath>"
        );
    }

    #[test]
    fn test_render_open_filter_all_objects() {
        // Both-nil is a legal "all objects" cursor
        assert_eq!(render_open_filter(&[], None), "");
    }

    #[test]
    fn test_render_get_filter_results() {
        assert_eq!(
            render_get_filter_results(7, 50, true),
            "<hFilter>7</hFilter><Count>50</Count><WholeObject>true</WholeObject>"
        );
    }

    #[test]
    fn test_parse_object_return_unwraps_single_child() {
        let ret = XmlElement::parse(
            r#"<return>
                 <Object VID="1"><Load VID="1" Master="1"><Name>A</Name></Load></Object>
                 <Object VID="2"><Area VID="2" Master="1"><Name>B</Name></Area></Object>
               </return>"#,
        )
        .unwrap();

        let objects = parse_object_return(&ret);
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].name, "Load");
        assert_eq!(objects[1].name, "Area");
    }

    #[test]
    fn test_parse_version_return() {
        let ret = XmlElement::parse(
            "<return><kernel>2.1.0</kernel><rootfs>2.1.0</rootfs><app>3.2.1</app></return>",
        )
        .unwrap();
        let version = VersionInfo::from_return(&ret);
        assert_eq!(version.app.as_deref(), Some("3.2.1"));
        assert_eq!(version.kernel.as_deref(), Some("2.1.0"));
    }

    #[test]
    fn test_parse_bool_return() {
        let truthy = XmlElement::parse("<return>true</return>").unwrap();
        assert!(parse_bool_return(&truthy).unwrap());
        let empty = XmlElement::parse("<return></return>").unwrap();
        assert!(!parse_bool_return(&empty).unwrap());
    }
}
