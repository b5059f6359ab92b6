use serde::Deserialize;

use super::menu::MenuArticle;

/// Inbound message envelope. WeChat wraps every field of the POST body in
/// a `<xml>` element; only the fields relevant to this board are kept and
/// everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    #[serde(rename = "ToUserName")]
    pub to_user_name: String,
    #[serde(rename = "FromUserName")]
    pub from_user_name: String,
    #[serde(rename = "CreateTime", default)]
    pub create_time: i64,
    #[serde(rename = "MsgType")]
    pub msg_type: String,
    // Event messages only.
    #[serde(rename = "Event")]
    pub event: Option<String>,
    #[serde(rename = "EventKey")]
    pub event_key: Option<String>,
    // Text messages only.
    #[serde(rename = "Content")]
    pub content: Option<String>,
}

impl IncomingMessage {
    /// True for a menu-click event. WeChat sends `Event` as `CLICK`; the
    /// comparison is case-insensitive to be safe.
    pub fn is_menu_click(&self) -> bool {
        self.msg_type == "event"
            && self
                .event
                .as_deref()
                .is_some_and(|e| e.eq_ignore_ascii_case("click"))
    }
}

pub fn parse(body: &str) -> Result<IncomingMessage, quick_xml::DeError> {
    quick_xml::de::from_str(body)
}

/// Builds the single-article news reply. `To`/`From` are swapped relative
/// to the inbound message; field names and CDATA wrapping must match the
/// platform contract byte for byte, so the envelope is written literally.
pub fn news_reply(msg: &IncomingMessage, article: &MenuArticle, create_time: i64) -> String {
    format!(
        "<xml>\
<ToUserName><![CDATA[{to}]]></ToUserName>\
<FromUserName><![CDATA[{from}]]></FromUserName>\
<CreateTime>{create_time}</CreateTime>\
<MsgType><![CDATA[news]]></MsgType>\
<ArticleCount>1</ArticleCount>\
<Articles>\
<item>\
<Title><![CDATA[{title}]]></Title>\
<Description><![CDATA[{description}]]></Description>\
<PicUrl><![CDATA[{pic_url}]]></PicUrl>\
<Url><![CDATA[{url}]]></Url>\
</item>\
</Articles>\
</xml>",
        to = msg.from_user_name,
        from = msg.to_user_name,
        create_time = create_time,
        title = article.title,
        description = article.description,
        pic_url = article.pic_url,
        url = article.url,
    )
}
