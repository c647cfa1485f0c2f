use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// 参考姿势模板。进程启动时从内置目录载入，运行期只读。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseTemplate {
    pub id: String,
    /// 双语名称，"中文 / English"
    pub name: String,
    pub tags: Vec<String>,
    /// 关节名 -> 目标角度（度）。键是开放集合，如 "L_elbow"、"HeadYaw"。
    pub angles: BTreeMap<String, f64>,
    /// 区域权重（至少含 "upper"/"lower"）。目前仅随模板下发，
    /// 评分公式未使用。
    pub weights: BTreeMap<String, f64>,
    pub sequence: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera_hint: Option<CameraHint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraHint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framing: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light: Option<String>,
}

/// 不可变的模板目录，按 id 索引，附带稳定的展示顺序。
#[derive(Debug)]
pub struct PoseCatalog {
    by_id: HashMap<String, PoseTemplate>,
    order: Vec<String>,
}

impl PoseCatalog {
    pub fn builtin() -> Self {
        Self::from_templates(builtin_templates())
    }

    pub fn from_templates(templates: Vec<PoseTemplate>) -> Self {
        let order: Vec<String> = templates.iter().map(|t| t.id.clone()).collect();
        let by_id = templates.into_iter().map(|t| (t.id.clone(), t)).collect();
        Self { by_id, order }
    }

    pub fn get(&self, id: &str) -> Option<&PoseTemplate> {
        self.by_id.get(id)
    }

    pub fn list(&self) -> Vec<&PoseTemplate> {
        self.order
            .iter()
            .filter_map(|id| self.by_id.get(id))
            .collect()
    }

    pub fn list_by_tag(&self, tag: &str) -> Vec<&PoseTemplate> {
        self.list()
            .into_iter()
            .filter(|t| t.tags.iter().any(|candidate| candidate == tag))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

fn angles(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn weights(upper: f64, lower: f64) -> BTreeMap<String, f64> {
    BTreeMap::from([("upper".to_string(), upper), ("lower".to_string(), lower)])
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// 产品内置的五个参考姿势
fn builtin_templates() -> Vec<PoseTemplate> {
    vec![
        PoseTemplate {
            id: "pose_sunshine_001".to_string(),
            name: "阳光半身侧身笑 / Sunshine Side Portrait".to_string(),
            tags: strings(&["阳光", "海滩", "女生", "sunshine", "beach", "casual"]),
            angles: angles(&[
                ("L_elbow", 160.0),
                ("R_elbow", 90.0),
                ("HeadYaw", 10.0),
                ("L_shoulder", 45.0),
                ("R_shoulder", 35.0),
            ]),
            weights: weights(0.6, 0.4),
            sequence: strings(&[
                "抬右手触鬓 / Raise right hand to hair",
                "左脚前一点 / Left foot slightly forward",
                "看镜头上沿 / Look above camera lens",
            ]),
            camera_hint: Some(CameraHint {
                framing: Some("半身 / Half body".to_string()),
                height: Some("肚脐位 / Belly button level".to_string()),
                distance: Some("约1.5m / ~1.5m".to_string()),
                light: Some("右脸受光 / Right face lighting".to_string()),
            }),
        },
        PoseTemplate {
            id: "pose_casual_002".to_string(),
            name: "休闲双手叉腰 / Casual Hands on Hips".to_string(),
            tags: strings(&["休闲", "街拍", "中性", "casual", "street", "unisex"]),
            angles: angles(&[
                ("L_elbow", 130.0),
                ("R_elbow", 130.0),
                ("L_hip", 15.0),
                ("R_hip", -15.0),
                ("HeadYaw", 0.0),
            ]),
            weights: weights(0.7, 0.3),
            sequence: strings(&[
                "双手叉腰 / Both hands on hips",
                "挺胸收腹 / Chest out, belly in",
                "自然微笑 / Natural smile",
            ]),
            camera_hint: Some(CameraHint {
                framing: Some("3/4身 / 3/4 body".to_string()),
                height: Some("胸部位 / Chest level".to_string()),
                distance: Some("约2m / ~2m".to_string()),
                light: Some("正面柔光 / Front soft light".to_string()),
            }),
        },
        PoseTemplate {
            id: "pose_portrait_003".to_string(),
            name: "经典肖像姿势 / Classic Portrait Pose".to_string(),
            tags: strings(&["肖像", "正式", "商务", "portrait", "formal", "business"]),
            angles: angles(&[
                ("L_elbow", 90.0),
                ("R_elbow", 85.0),
                ("HeadYaw", -5.0),
                ("HeadPitch", 2.0),
            ]),
            weights: weights(0.8, 0.2),
            sequence: strings(&[
                "左手扶右臂 / Left hand on right arm",
                "身体微侧 / Body slightly angled",
                "眼神坚定 / Confident gaze",
            ]),
            camera_hint: Some(CameraHint {
                framing: Some("肩部以上 / Shoulder up".to_string()),
                height: Some("眼部水平 / Eye level".to_string()),
                distance: Some("约1m / ~1m".to_string()),
                light: Some("侧光突出轮廓 / Side lighting".to_string()),
            }),
        },
        PoseTemplate {
            id: "pose_dynamic_004".to_string(),
            name: "动感跃起 / Dynamic Jump".to_string(),
            tags: strings(&["动感", "活力", "运动", "dynamic", "energy", "sports"]),
            angles: angles(&[
                ("L_knee", 45.0),
                ("R_knee", 90.0),
                ("L_elbow", 45.0),
                ("R_elbow", 135.0),
                ("HeadPitch", -10.0),
            ]),
            weights: weights(0.5, 0.5),
            sequence: strings(&[
                "准备起跳 / Prepare to jump",
                "双臂展开 / Arms spread wide",
                "表情兴奋 / Excited expression",
            ]),
            camera_hint: Some(CameraHint {
                framing: Some("全身 / Full body".to_string()),
                height: Some("腰部水平 / Waist level".to_string()),
                distance: Some("约3m / ~3m".to_string()),
                light: Some("充足自然光 / Bright natural light".to_string()),
            }),
        },
        PoseTemplate {
            id: "pose_elegant_005".to_string(),
            name: "优雅侧身 / Elegant Side Pose".to_string(),
            tags: strings(&["优雅", "女性", "礼服", "elegant", "feminine", "dress"]),
            angles: angles(&[
                ("L_elbow", 120.0),
                ("R_elbow", 160.0),
                ("L_hip", 20.0),
                ("HeadYaw", 25.0),
                ("spine_curve", 8.0),
            ]),
            weights: weights(0.6, 0.4),
            sequence: strings(&[
                "身体成S型曲线 / S-curve body line",
                "一手扶腰际 / One hand at waist",
                "优雅回眸 / Elegant glance back",
            ]),
            camera_hint: Some(CameraHint {
                framing: Some("3/4身 / 3/4 body".to_string()),
                height: Some("胸部位 / Chest level".to_string()),
                distance: Some("约1.8m / ~1.8m".to_string()),
                light: Some("柔和侧逆光 / Soft rim lighting".to_string()),
            }),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_has_five_templates() {
        let catalog = PoseCatalog::builtin();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.list().len(), 5);
        assert_eq!(catalog.list()[0].id, "pose_sunshine_001");
    }

    #[test]
    fn lookup_by_id() {
        let catalog = PoseCatalog::builtin();
        let pose = catalog.get("pose_dynamic_004").expect("dynamic pose");
        assert!(pose.name.contains("Dynamic Jump"));
        assert!(catalog.get("pose_missing_999").is_none());
    }

    #[test]
    fn tag_filter_matches_both_languages() {
        let catalog = PoseCatalog::builtin();
        assert_eq!(catalog.list_by_tag("casual").len(), 2);
        assert_eq!(catalog.list_by_tag("优雅").len(), 1);
        assert!(catalog.list_by_tag("nonexistent").is_empty());
    }

    #[test]
    fn templates_serialize_camel_case() {
        let catalog = PoseCatalog::builtin();
        let json = serde_json::to_value(catalog.get("pose_sunshine_001").unwrap()).unwrap();
        assert!(json.get("cameraHint").is_some());
        assert_eq!(json["angles"]["L_elbow"], 160.0);
        assert_eq!(json["weights"]["upper"], 0.6);
    }
}
